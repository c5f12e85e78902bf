//! Packt 共通ライブラリ
//! ビットフィールドからプロトコルヘッダを組み立てるパケット構築エンジン

pub mod packet;
pub mod utils;

/// パケット構築用エラー型定義
/// ビットフィールド生成・アドレス検証・数値変換の失敗を表す

use thiserror::Error;

/// パケット構築処理の統合エラー型
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PacketError {
    /// フィールド幅が0
    #[error("ビットフィールドのサイズが不正です: {size}")]
    InvalidSize { size: usize },

    /// 値のビット数が宣言サイズを超えている（切り詰め無効時）
    #[error("ビット数が宣言サイズを超えています: ビット数 {bits}, サイズ {size}")]
    OutOfBounds { bits: usize, size: usize },

    /// サポートされていない値の種類
    #[error("この値はビット列に変換できません: {0}")]
    UnsupportedValueType(String),

    /// ドット区切り4オクテット形式ではないIPアドレス
    #[error("不正なIPアドレス: {0}")]
    InvalidAddress(String),

    /// 8バイトを超えるバイト列の数値変換
    #[error("数値に変換できません: バイト列の長さ {len} が上限 8 を超えています")]
    NumericRange { len: usize },
}

/// Result型のエイリアス
pub type PacketResult<T> = Result<T, PacketError>;

/// エラーヘルパー関数
impl PacketError {
    /// サイズ不正エラーを作成
    pub fn invalid_size(size: usize) -> Self {
        PacketError::InvalidSize { size }
    }

    /// 範囲外エラーを作成
    pub fn out_of_bounds(bits: usize, size: usize) -> Self {
        PacketError::OutOfBounds { bits, size }
    }

    /// 不正アドレスエラーを作成
    pub fn invalid_address(addr: &str) -> Self {
        PacketError::InvalidAddress(addr.to_string())
    }

    /// 値の種類に関するエラーを作成
    pub fn unsupported(kind: &str) -> Self {
        PacketError::UnsupportedValueType(kind.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_bounds_display() {
        let err = PacketError::out_of_bounds(16, 4);
        assert_eq!(
            format!("{}", err),
            "ビット数が宣言サイズを超えています: ビット数 16, サイズ 4"
        );
    }

    #[test]
    fn test_invalid_address_display() {
        let err = PacketError::invalid_address("999.1.1.1");
        assert_eq!(format!("{}", err), "不正なIPアドレス: 999.1.1.1");
    }

    #[test]
    fn test_result_alias() {
        fn test_function() -> PacketResult<u32> {
            Err(PacketError::invalid_size(0))
        }

        assert_eq!(test_function(), Err(PacketError::InvalidSize { size: 0 }));
    }
}

/// ビット操作ユーティリティ
/// 数値・バイト列・ビット列の相互変換

use bitvec::prelude::*;

use super::exceptions::{PacketError, PacketResult};

/// 数値を指定バイト数のバイト列に変換（下位バイトが先頭）
///
/// 9バイト目以降は0で埋める
pub fn number_to_bytes_le(value: u64, width: usize) -> Vec<u8> {
    (0..width)
        .map(|b| if b < 8 { (value >> (b * 8)) as u8 } else { 0 })
        .collect()
}

/// バイト列をビット列に展開する
///
/// 各バイトの最下位ビットが先に並ぶ
pub fn bytes_to_bit_list(bytes: &[u8]) -> Vec<bool> {
    BitSlice::<u8, Lsb0>::from_slice(bytes).iter().by_vals().collect()
}

/// ビット列をバイト列にまとめる
///
/// 8ビットごとに区切り、区切りの先頭ビットをそのバイトの最下位ビットとする。
/// 端数のビットも1バイトとして出力する
pub fn bit_list_to_bytes(bits: &[bool]) -> Vec<u8> {
    bits.chunks(8)
        .map(|chunk| {
            chunk
                .iter()
                .enumerate()
                .fold(0u8, |byte, (i, &bit)| byte | ((bit as u8) << i))
        })
        .collect()
}

/// バイト列を符号なし整数に変換（先頭バイトが最上位）
///
/// Args:
///     bytes: 最大8バイトのバイト列
///
/// Returns:
///     変換された整数値。8バイトを超える場合は NumericRange エラー
pub fn bytes_to_number(bytes: &[u8]) -> PacketResult<u64> {
    if bytes.len() > 8 {
        return Err(PacketError::NumericRange { len: bytes.len() });
    }

    Ok(bytes
        .iter()
        .fold(0u64, |num, &byte| (num << 8) | byte as u64))
}

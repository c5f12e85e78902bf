/// IPv4アドレス（ドット区切り4オクテット）の検証と変換

use once_cell::sync::Lazy;
use regex::Regex;

use super::bit_utils::bytes_to_number;
use super::exceptions::{PacketError, PacketResult};

// 0..255 の10進数をちょうど4つ '.' で区切ったもの。先頭ゼロは不可
static IP_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:(?:25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])\.){3}(?:25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])$",
    )
    .expect("IPv4 pattern must compile")
});

/// IPアドレス文字列を検証する
///
/// 妥当な場合は入力をそのまま返す
pub fn validate_ip(ip: &str) -> PacketResult<&str> {
    if IP_PATTERN.is_match(ip) {
        Ok(ip)
    } else {
        Err(PacketError::invalid_address(ip))
    }
}

/// IPアドレスを4バイトのバイト列に変換
pub fn ip_to_bytes(ip: &str) -> PacketResult<[u8; 4]> {
    validate_ip(ip)?;

    let mut out = [0u8; 4];
    for (slot, part) in out.iter_mut().zip(ip.split('.')) {
        *slot = part.parse().map_err(|_| PacketError::invalid_address(ip))?;
    }
    Ok(out)
}

/// IPアドレスを整数に変換（第1オクテットが最上位）
pub fn ip_to_int(ip: &str) -> PacketResult<u32> {
    let bytes = ip_to_bytes(ip)?;
    Ok(bytes_to_number(&bytes)? as u32)
}

/// 整数からIPアドレス文字列を復元
pub fn ip_from_int(value: u32) -> String {
    let [a, b, c, d] = value.to_be_bytes();
    format!("{}.{}.{}.{}", a, b, c, d)
}

/// シリアライズ済みのアドレスフィールド（下位バイト先頭）からIPアドレスを復元
pub fn ip_from_field_bytes(bytes: [u8; 4]) -> String {
    ip_from_int(u32::from_le_bytes(bytes))
}

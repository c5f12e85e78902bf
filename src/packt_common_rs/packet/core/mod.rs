//! パケットコア機能
//! ビットフィールド、フィールドグループ、変換、エラー処理等のコア機能

pub mod address;
pub mod bit_field;
pub mod bit_field_group;
pub mod bit_utils;
pub mod exceptions;
pub mod format_base;

// 便利な再エクスポート
pub use address::{ip_from_field_bytes, ip_from_int, ip_to_bytes, ip_to_int, validate_ip};
pub use bit_field::{BitField, FieldValue};
pub use bit_field_group::BitFieldGroup;
pub use bit_utils::{bit_list_to_bytes, bytes_to_bit_list, bytes_to_number, number_to_bytes_le};
pub use exceptions::{PacketError, PacketResult};
pub use format_base::{BasePacket, HeaderFormat};

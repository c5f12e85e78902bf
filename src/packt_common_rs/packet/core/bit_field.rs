/// 固定長ビットフィールド
/// 数値・バイト列・文字列から生成される不変のビット列

use std::fmt;

use bitvec::field::BitField as _;
use bitvec::prelude::{BitSlice, BitVec, Lsb0};
use log::{debug, trace};

use super::bit_utils::number_to_bytes_le;
use super::exceptions::{PacketError, PacketResult};

/// ビットフィールドに変換可能な値
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    I8(i8),
    U8(u8),
    I16(i16),
    U16(u16),
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
    Bytes(Vec<u8>),
    Text(String),
}

impl FieldValue {
    /// 値の種類名
    pub fn kind(&self) -> &'static str {
        match self {
            FieldValue::I8(_) => "i8",
            FieldValue::U8(_) => "u8",
            FieldValue::I16(_) => "i16",
            FieldValue::U16(_) => "u16",
            FieldValue::I32(_) => "i32",
            FieldValue::U32(_) => "u32",
            FieldValue::I64(_) => "i64",
            FieldValue::U64(_) => "u64",
            FieldValue::Bytes(_) => "bytes",
            FieldValue::Text(_) => "text",
        }
    }

    /// 値をバイト列に変換する
    ///
    /// 整数は型の幅で下位バイトから並べる。文字列はUTF-16のコード単位ごとに2バイト
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            FieldValue::I8(v) => number_to_bytes_le(*v as u64, 1),
            FieldValue::U8(v) => number_to_bytes_le(*v as u64, 1),
            FieldValue::I16(v) => number_to_bytes_le(*v as u64, 2),
            FieldValue::U16(v) => number_to_bytes_le(*v as u64, 2),
            FieldValue::I32(v) => number_to_bytes_le(*v as u64, 4),
            FieldValue::U32(v) => number_to_bytes_le(*v as u64, 4),
            FieldValue::I64(v) => number_to_bytes_le(*v as u64, 8),
            FieldValue::U64(v) => number_to_bytes_le(*v, 8),
            FieldValue::Bytes(bytes) => bytes.clone(),
            FieldValue::Text(text) => text
                .encode_utf16()
                .flat_map(|unit| unit.to_le_bytes())
                .collect(),
        }
    }
}

macro_rules! impl_from_scalar {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for FieldValue {
                fn from(value: $ty) -> Self {
                    FieldValue::$variant(value)
                }
            }
        )*
    };
}

impl_from_scalar! {
    i8 => I8,
    u8 => U8,
    i16 => I16,
    u16 => U16,
    i32 => I32,
    u32 => U32,
    i64 => I64,
    u64 => U64,
    Vec<u8> => Bytes,
    String => Text,
}

impl From<&[u8]> for FieldValue {
    fn from(value: &[u8]) -> Self {
        FieldValue::Bytes(value.to_vec())
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

/// 宣言サイズを持つ不変のビット列
///
/// 格納されるビット数は常に `size` 以下
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BitField {
    bits: BitVec<u8, Lsb0>,
    size: usize,
}

impl BitField {
    /// 値からビットフィールドを作成（サイズを超える分は切り詰める）
    pub fn from_value(value: impl Into<FieldValue>, size: usize) -> PacketResult<Self> {
        Self::from_value_with(value, size, true)
    }

    /// 値からビットフィールドを作成
    ///
    /// Args:
    ///     value: 変換元の値
    ///     size: 宣言ビット幅
    ///     truncate: true なら先頭 `size` ビットのみ残す。false なら超過時に OutOfBounds
    pub fn from_value_with(
        value: impl Into<FieldValue>,
        size: usize,
        truncate: bool,
    ) -> PacketResult<Self> {
        let value = value.into();
        let mut bits = BitVec::<u8, Lsb0>::from_vec(value.to_bytes());

        if bits.len() > size && truncate {
            debug!(
                "truncating {} value from {} to {} bits",
                value.kind(),
                bits.len(),
                size
            );
            bits.truncate(size.max(1));
        }

        Self::new(bits, size)
    }

    /// ビット列とサイズからビットフィールドを作成
    pub fn new(bits: BitVec<u8, Lsb0>, size: usize) -> PacketResult<Self> {
        if size == 0 {
            return Err(PacketError::invalid_size(size));
        }
        if bits.len() > size {
            return Err(PacketError::out_of_bounds(bits.len(), size));
        }

        trace!("bit field created: {} of {} bits", bits.len(), size);
        Ok(Self { bits, size })
    }

    /// 宣言ビット幅
    pub fn size(&self) -> usize {
        self.size
    }

    /// 格納されているビット数
    pub fn bit_len(&self) -> usize {
        self.bits.len()
    }

    /// 格納されているビット列（先頭が最下位ビット）
    pub fn bits(&self) -> &BitSlice<u8, Lsb0> {
        &self.bits
    }

    /// バイト列に変換する
    ///
    /// 8ビットごとに区切り、先頭ビットを最下位ビットとして1バイトにまとめる
    pub fn to_bytes(&self) -> Vec<u8> {
        self.bits
            .chunks(8)
            .map(|chunk| chunk.load_le::<u8>())
            .collect()
    }
}

/// 最上位ビットを先頭に、宣言サイズまで0埋めした2進表記
impl fmt::Display for BitField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits: String = self
            .bits
            .iter()
            .by_vals()
            .rev()
            .map(|bit| if bit { '1' } else { '0' })
            .collect();
        write!(f, "{:0>width$}", digits, width = self.size)
    }
}

/// 名前付きビットフィールドの集合
/// 挿入順がそのまま送出順となる

use std::fmt;

use log::debug;

use super::bit_field::{BitField, FieldValue};
use super::exceptions::{PacketError, PacketResult};

/// 図の区切り線（65文字）
pub const SEPARATOR: &str = "+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+";

/// 1行あたりのビット数
pub const ROW_BITS: usize = 32;

/// ビットフィールドグループ（プロトコルヘッダ1つ、またはデータブロック1つ）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitFieldGroup {
    name: String,
    fields: Vec<(String, BitField)>,
}

impl BitFieldGroup {
    /// 空のグループを作成
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            fields: Vec::new(),
        }
    }

    /// 値からグループを作成
    ///
    /// 文字列は1文字（UTF-16コード単位）ごとに16ビット、バイト列は1バイトごとに8ビットの
    /// フィールドとなり、フィールド名は位置の番号。整数は非対応
    pub fn from_value(name: &str, data: impl Into<FieldValue>) -> PacketResult<Self> {
        let mut group = Self::new(name);

        match data.into() {
            FieldValue::Text(text) => {
                for (idx, unit) in text.encode_utf16().enumerate() {
                    group.insert(&idx.to_string(), BitField::from_value(unit, 16)?);
                }
            }
            FieldValue::Bytes(bytes) => {
                for (idx, byte) in bytes.into_iter().enumerate() {
                    group.insert(&idx.to_string(), BitField::from_value(byte, 8)?);
                }
            }
            other => return Err(PacketError::unsupported(other.kind())),
        }

        debug!("group '{}' built with {} fields", group.name, group.len());
        Ok(group)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// フィールドを追加する
    ///
    /// 同名のフィールドが既にあれば、その位置のまま置き換える
    pub fn insert(&mut self, name: &str, field: BitField) {
        match self.fields.iter_mut().find(|(n, _)| n == name) {
            Some((_, slot)) => *slot = field,
            None => self.fields.push((name.to_string(), field)),
        }
    }

    /// フィールドを名前で検索
    pub fn get(&self, name: &str) -> Option<&BitField> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, f)| f)
    }

    /// フィールド名を送出順で取得
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BitField)> {
        self.fields.iter().map(|(n, f)| (n.as_str(), f))
    }

    /// フィールド数
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// 宣言ビット幅の合計
    pub fn bit_size(&self) -> usize {
        self.fields.iter().map(|(_, f)| f.size()).sum()
    }

    /// バイト列に変換する
    ///
    /// 各フィールドを個別にバイト単位へ切り上げてから連結する。
    /// 8ビット未満のフィールドも1バイトを占めるため、`bit_size() / 8` とは一致しない場合がある
    pub fn to_bytes(&self) -> Vec<u8> {
        self.fields.iter().flat_map(|(_, f)| f.to_bytes()).collect()
    }
}

fn spaced(bits: &str) -> String {
    let chars: Vec<String> = bits.chars().map(String::from).collect();
    chars.join(" ")
}

/// ビット図（1行32ビット）
impl fmt::Display for BitFieldGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pad = ROW_BITS + self.name.chars().count() / 2;
        writeln!(f, "{:>pad$}", self.name.to_uppercase(), pad = pad)?;
        writeln!(f, "{}", SEPARATOR)?;
        f.write_str("|")?;

        let mut row_bits = 0;
        let mut row_start = 0;
        for (idx, (_, field)) in self.fields.iter().enumerate() {
            write!(f, "{}|", spaced(&field.to_string()))?;
            row_bits += field.size();

            if row_bits >= ROW_BITS {
                f.write_str(" ")?;
                for (name, _) in &self.fields[row_start..=idx] {
                    write!(f, "[{}] ", name)?;
                }
                row_start = idx + 1;
                f.write_str("\n")?;
                if idx + 1 < self.fields.len() {
                    f.write_str("|")?;
                }
                row_bits = 0;
            }
        }

        if row_bits != 0 {
            writeln!(f, "{}|", spaced(&"0".repeat(ROW_BITS - row_bits)))?;
        }

        f.write_str(SEPARATOR)
    }
}

/// パケットフォーマットの基盤実装
/// ヘッダビルダーとパケットの共通trait

use log::debug;

use super::bit_field::FieldValue;
use super::bit_field_group::BitFieldGroup;
use super::exceptions::PacketResult;
use crate::packt_common_rs::packet::types::ip_header::IpHeader;

/// パケット全体図の先頭に付くビット目盛り
///
/// 1行目と2行目の `|` / `v` は各オクテットの最終ビットを指す
pub const BIT_RULER: &str = concat!(
    "               |               |               |               |\n",
    " 0             v     1         v         2     v             3 v\n",
    " 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1\n",
    "+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+\n",
);

/// プロトコルヘッダビルダーの基本trait
///
/// 属性を設定した後 `fill_fields` で送出順のビットフィールドを構築する
pub trait HeaderFormat {
    /// 現在の属性値からフィールドを作り直す（何度呼んでも同じ結果）
    fn fill_fields(&mut self) -> PacketResult<()>;

    /// 構築済みのフィールドグループ
    fn group(&self) -> &BitFieldGroup;

    /// フィールドグループを取り出す
    fn into_group(self) -> BitFieldGroup;

    /// フィールドを構築してグループを返す
    fn build(mut self) -> PacketResult<BitFieldGroup>
    where
        Self: Sized,
    {
        self.fill_fields()?;
        Ok(self.into_group())
    }
}

/// パケットの基本trait
///
/// ヘッダ群と任意のデータグループを順に保持する
pub trait BasePacket {
    /// パケットを構成するグループ（送出順）
    fn field_groups(&self) -> &[BitFieldGroup];

    /// グループを末尾に追加する
    fn push_group(&mut self, group: BitFieldGroup);

    /// ヘッダを確定して末尾に追加する
    ///
    /// フィールド構築に失敗した場合、パケットは変更されない
    fn add_header<H: HeaderFormat>(&mut self, header: H) -> PacketResult<&BitFieldGroup>
    where
        Self: Sized,
    {
        let group = header.build()?;
        debug!("appending header '{}' ({} bits)", group.name(), group.bit_size());
        self.push_group(group);
        Ok(self.last_group())
    }

    /// IPヘッダを追加する
    fn ip_header(&mut self, header: IpHeader) -> PacketResult<&BitFieldGroup>
    where
        Self: Sized,
    {
        self.add_header(header)
    }

    /// 生データを "data" グループとして末尾に追加する
    fn data(&mut self, data: impl Into<FieldValue>) -> PacketResult<&BitFieldGroup>
    where
        Self: Sized,
    {
        let group = BitFieldGroup::from_value("data", data)?;
        debug!("appending data group ({} bits)", group.bit_size());
        self.push_group(group);
        Ok(self.last_group())
    }

    /// 総ビット数
    fn num_bits(&self) -> usize {
        self.field_groups().iter().map(BitFieldGroup::bit_size).sum()
    }

    /// 総バイト数（切り捨て）
    fn num_bytes(&self) -> usize {
        self.num_bits() / 8
    }

    /// パケットをバイト列に変換
    fn to_bytes(&self) -> Vec<u8> {
        self.field_groups()
            .iter()
            .flat_map(BitFieldGroup::to_bytes)
            .collect()
    }

    /// 目盛りと各グループのビット図
    fn render(&self) -> String {
        let mut out = String::from(BIT_RULER);
        for group in self.field_groups() {
            out.push_str(&group.to_string());
            out.push('\n');
        }
        out
    }

    #[doc(hidden)]
    fn last_group(&self) -> &BitFieldGroup {
        let groups = self.field_groups();
        &groups[groups.len() - 1]
    }
}

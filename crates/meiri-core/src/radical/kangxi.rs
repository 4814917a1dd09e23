use std::collections::HashMap;

use serde::Serialize;

use super::{CharacterLookup, CharacterRecord, FIELD_RS_UNICODE, single_char};
use crate::error::Result;

/// One of the 214 Kang Xi dictionary radicals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct KangXiRadical {
    pub character: char,
    /// Radical number, 1 to 214.
    pub number: u16,
    pub strokes: u8,
}

impl KangXiRadical {
    const fn new(character: char, number: u16, strokes: u8) -> Self {
        Self {
            character,
            number,
            strokes,
        }
    }
}

/// The Kang Xi radicals in radical-number order.
pub const KANGXI_RADICALS: [KangXiRadical; 214] = [
    KangXiRadical::new('一', 1, 1),
    KangXiRadical::new('丨', 2, 1),
    KangXiRadical::new('丶', 3, 1),
    KangXiRadical::new('丿', 4, 1),
    KangXiRadical::new('乙', 5, 1),
    KangXiRadical::new('亅', 6, 1),
    KangXiRadical::new('二', 7, 2),
    KangXiRadical::new('亠', 8, 2),
    KangXiRadical::new('人', 9, 2),
    KangXiRadical::new('儿', 10, 2),
    KangXiRadical::new('入', 11, 2),
    KangXiRadical::new('八', 12, 2),
    KangXiRadical::new('冂', 13, 2),
    KangXiRadical::new('冖', 14, 2),
    KangXiRadical::new('冫', 15, 2),
    KangXiRadical::new('几', 16, 2),
    KangXiRadical::new('凵', 17, 2),
    KangXiRadical::new('刀', 18, 2),
    KangXiRadical::new('力', 19, 2),
    KangXiRadical::new('勹', 20, 2),
    KangXiRadical::new('匕', 21, 2),
    KangXiRadical::new('匚', 22, 2),
    KangXiRadical::new('匸', 23, 2),
    KangXiRadical::new('十', 24, 2),
    KangXiRadical::new('卜', 25, 2),
    KangXiRadical::new('卩', 26, 2),
    KangXiRadical::new('厂', 27, 2),
    KangXiRadical::new('厶', 28, 2),
    KangXiRadical::new('又', 29, 2),
    KangXiRadical::new('口', 30, 3),
    KangXiRadical::new('囗', 31, 3),
    KangXiRadical::new('土', 32, 3),
    KangXiRadical::new('士', 33, 3),
    KangXiRadical::new('夂', 34, 3),
    KangXiRadical::new('夊', 35, 3),
    KangXiRadical::new('夕', 36, 3),
    KangXiRadical::new('大', 37, 3),
    KangXiRadical::new('女', 38, 3),
    KangXiRadical::new('子', 39, 3),
    KangXiRadical::new('宀', 40, 3),
    KangXiRadical::new('寸', 41, 3),
    KangXiRadical::new('小', 42, 3),
    KangXiRadical::new('尢', 43, 3),
    KangXiRadical::new('尸', 44, 3),
    KangXiRadical::new('屮', 45, 3),
    KangXiRadical::new('山', 46, 3),
    KangXiRadical::new('巛', 47, 3),
    KangXiRadical::new('工', 48, 3),
    KangXiRadical::new('己', 49, 3),
    KangXiRadical::new('巾', 50, 3),
    KangXiRadical::new('干', 51, 3),
    KangXiRadical::new('幺', 52, 3),
    KangXiRadical::new('广', 53, 3),
    KangXiRadical::new('廴', 54, 3),
    KangXiRadical::new('廾', 55, 3),
    KangXiRadical::new('弋', 56, 3),
    KangXiRadical::new('弓', 57, 3),
    KangXiRadical::new('彐', 58, 3),
    KangXiRadical::new('彡', 59, 3),
    KangXiRadical::new('彳', 60, 3),
    KangXiRadical::new('心', 61, 4),
    KangXiRadical::new('戈', 62, 4),
    KangXiRadical::new('戶', 63, 4),
    KangXiRadical::new('手', 64, 4),
    KangXiRadical::new('支', 65, 4),
    KangXiRadical::new('攴', 66, 4),
    KangXiRadical::new('文', 67, 4),
    KangXiRadical::new('斗', 68, 4),
    KangXiRadical::new('斤', 69, 4),
    KangXiRadical::new('方', 70, 4),
    KangXiRadical::new('无', 71, 4),
    KangXiRadical::new('日', 72, 4),
    KangXiRadical::new('曰', 73, 4),
    KangXiRadical::new('月', 74, 4),
    KangXiRadical::new('木', 75, 4),
    KangXiRadical::new('欠', 76, 4),
    KangXiRadical::new('止', 77, 4),
    KangXiRadical::new('歹', 78, 4),
    KangXiRadical::new('殳', 79, 4),
    KangXiRadical::new('毋', 80, 4),
    KangXiRadical::new('比', 81, 4),
    KangXiRadical::new('毛', 82, 4),
    KangXiRadical::new('氏', 83, 4),
    KangXiRadical::new('气', 84, 4),
    KangXiRadical::new('水', 85, 4),
    KangXiRadical::new('火', 86, 4),
    KangXiRadical::new('爪', 87, 4),
    KangXiRadical::new('父', 88, 4),
    KangXiRadical::new('爻', 89, 4),
    KangXiRadical::new('爿', 90, 4),
    KangXiRadical::new('片', 91, 4),
    KangXiRadical::new('牙', 92, 4),
    KangXiRadical::new('牛', 93, 4),
    KangXiRadical::new('犬', 94, 4),
    KangXiRadical::new('玄', 95, 5),
    KangXiRadical::new('玉', 96, 5),
    KangXiRadical::new('瓜', 97, 5),
    KangXiRadical::new('瓦', 98, 5),
    KangXiRadical::new('甘', 99, 5),
    KangXiRadical::new('生', 100, 5),
    KangXiRadical::new('用', 101, 5),
    KangXiRadical::new('田', 102, 5),
    KangXiRadical::new('疋', 103, 5),
    KangXiRadical::new('疒', 104, 5),
    KangXiRadical::new('癶', 105, 5),
    KangXiRadical::new('白', 106, 5),
    KangXiRadical::new('皮', 107, 5),
    KangXiRadical::new('皿', 108, 5),
    KangXiRadical::new('目', 109, 5),
    KangXiRadical::new('矛', 110, 5),
    KangXiRadical::new('矢', 111, 5),
    KangXiRadical::new('石', 112, 5),
    KangXiRadical::new('示', 113, 5),
    KangXiRadical::new('禸', 114, 5),
    KangXiRadical::new('禾', 115, 5),
    KangXiRadical::new('穴', 116, 5),
    KangXiRadical::new('立', 117, 5),
    KangXiRadical::new('竹', 118, 6),
    KangXiRadical::new('米', 119, 6),
    KangXiRadical::new('糸', 120, 6),
    KangXiRadical::new('缶', 121, 6),
    KangXiRadical::new('网', 122, 6),
    KangXiRadical::new('羊', 123, 6),
    KangXiRadical::new('羽', 124, 6),
    KangXiRadical::new('老', 125, 6),
    KangXiRadical::new('而', 126, 6),
    KangXiRadical::new('耒', 127, 6),
    KangXiRadical::new('耳', 128, 6),
    KangXiRadical::new('聿', 129, 6),
    KangXiRadical::new('肉', 130, 6),
    KangXiRadical::new('臣', 131, 6),
    KangXiRadical::new('自', 132, 6),
    KangXiRadical::new('至', 133, 6),
    KangXiRadical::new('臼', 134, 6),
    KangXiRadical::new('舌', 135, 6),
    KangXiRadical::new('舛', 136, 6),
    KangXiRadical::new('舟', 137, 6),
    KangXiRadical::new('艮', 138, 6),
    KangXiRadical::new('色', 139, 6),
    KangXiRadical::new('艸', 140, 6),
    KangXiRadical::new('虍', 141, 6),
    KangXiRadical::new('虫', 142, 6),
    KangXiRadical::new('血', 143, 6),
    KangXiRadical::new('行', 144, 6),
    KangXiRadical::new('衣', 145, 6),
    KangXiRadical::new('襾', 146, 6),
    KangXiRadical::new('見', 147, 7),
    KangXiRadical::new('角', 148, 7),
    KangXiRadical::new('言', 149, 7),
    KangXiRadical::new('谷', 150, 7),
    KangXiRadical::new('豆', 151, 7),
    KangXiRadical::new('豕', 152, 7),
    KangXiRadical::new('豸', 153, 7),
    KangXiRadical::new('貝', 154, 7),
    KangXiRadical::new('赤', 155, 7),
    KangXiRadical::new('走', 156, 7),
    KangXiRadical::new('足', 157, 7),
    KangXiRadical::new('身', 158, 7),
    KangXiRadical::new('車', 159, 7),
    KangXiRadical::new('辛', 160, 7),
    KangXiRadical::new('辰', 161, 7),
    KangXiRadical::new('辵', 162, 7),
    KangXiRadical::new('邑', 163, 7),
    KangXiRadical::new('酉', 164, 7),
    KangXiRadical::new('釆', 165, 7),
    KangXiRadical::new('里', 166, 7),
    KangXiRadical::new('金', 167, 8),
    KangXiRadical::new('長', 168, 8),
    KangXiRadical::new('門', 169, 8),
    KangXiRadical::new('阜', 170, 8),
    KangXiRadical::new('隶', 171, 8),
    KangXiRadical::new('隹', 172, 8),
    KangXiRadical::new('雨', 173, 8),
    KangXiRadical::new('靑', 174, 8),
    KangXiRadical::new('非', 175, 8),
    KangXiRadical::new('面', 176, 9),
    KangXiRadical::new('革', 177, 9),
    KangXiRadical::new('韋', 178, 9),
    KangXiRadical::new('韭', 179, 9),
    KangXiRadical::new('音', 180, 9),
    KangXiRadical::new('頁', 181, 9),
    KangXiRadical::new('風', 182, 9),
    KangXiRadical::new('飛', 183, 9),
    KangXiRadical::new('食', 184, 9),
    KangXiRadical::new('首', 185, 9),
    KangXiRadical::new('香', 186, 9),
    KangXiRadical::new('馬', 187, 10),
    KangXiRadical::new('骨', 188, 10),
    KangXiRadical::new('高', 189, 10),
    KangXiRadical::new('髟', 190, 10),
    KangXiRadical::new('鬥', 191, 10),
    KangXiRadical::new('鬯', 192, 10),
    KangXiRadical::new('鬲', 193, 10),
    KangXiRadical::new('鬼', 194, 10),
    KangXiRadical::new('魚', 195, 11),
    KangXiRadical::new('鳥', 196, 11),
    KangXiRadical::new('鹵', 197, 11),
    KangXiRadical::new('鹿', 198, 11),
    KangXiRadical::new('麥', 199, 11),
    KangXiRadical::new('麻', 200, 11),
    KangXiRadical::new('黃', 201, 12),
    KangXiRadical::new('黍', 202, 12),
    KangXiRadical::new('黑', 203, 12),
    KangXiRadical::new('黹', 204, 12),
    KangXiRadical::new('黽', 205, 13),
    KangXiRadical::new('鼎', 206, 13),
    KangXiRadical::new('鼓', 207, 13),
    KangXiRadical::new('鼠', 208, 13),
    KangXiRadical::new('鼻', 209, 14),
    KangXiRadical::new('齊', 210, 14),
    KangXiRadical::new('齒', 211, 15),
    KangXiRadical::new('龍', 212, 16),
    KangXiRadical::new('龜', 213, 16),
    KangXiRadical::new('龠', 214, 17),
];

/// Offline lookup source backed by [`KANGXI_RADICALS`].
///
/// Only exact matches of a radical character are found; any other character
/// yields no records.
#[derive(Debug, Clone)]
pub struct StaticRadicalTable {
    by_char: HashMap<char, KangXiRadical>,
}

impl StaticRadicalTable {
    #[must_use]
    pub fn new() -> Self {
        Self {
            by_char: KANGXI_RADICALS.iter().map(|r| (r.character, *r)).collect(),
        }
    }

    /// Returns the radical entry for an exact character match.
    #[must_use]
    pub fn get(&self, character: &str) -> Option<&KangXiRadical> {
        single_char(character).and_then(|c| self.by_char.get(&c))
    }

    /// All entries in radical-number order.
    #[must_use]
    pub fn entries(&self) -> &'static [KangXiRadical] {
        &KANGXI_RADICALS
    }
}

impl Default for StaticRadicalTable {
    fn default() -> Self {
        Self::new()
    }
}

impl CharacterLookup for StaticRadicalTable {
    fn lookup(&self, character: &str) -> Result<Vec<CharacterRecord>> {
        Ok(self
            .get(character)
            .map(|r| {
                // A radical written on its own has no residual strokes.
                CharacterRecord::new(character)
                    .with_field(FIELD_RS_UNICODE, format!("{}.0", r.number))
                    .with_field("kTotalStrokes", r.strokes.to_string())
            })
            .into_iter()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::radical::{RadicalResolver, Resolution, UnresolvedReason};
    use crate::types::RadicalCode;

    #[test]
    fn table_is_complete_and_ordered() {
        for (i, r) in KANGXI_RADICALS.iter().enumerate() {
            assert_eq!(usize::from(r.number), i + 1, "out of order at {}", r.character);
        }
        assert_eq!(StaticRadicalTable::new().by_char.len(), 214);
    }

    #[test]
    fn exact_match_lookup() {
        let table = StaticRadicalTable::new();

        let r = table.get("門").unwrap();
        assert_eq!(r.number, 169);
        assert_eq!(r.strokes, 8);

        assert_eq!(table.get("龠").unwrap().number, 214);
        assert!(table.get("閶").is_none());
        assert!(table.get("門門").is_none());
        assert!(table.get("").is_none());
    }

    #[test]
    fn resolves_radical_characters_offline() {
        let resolver = RadicalResolver::new(StaticRadicalTable::new());

        assert_eq!(
            resolver.resolve("水"),
            Resolution::Resolved(RadicalCode::from("85"))
        );
        assert_eq!(
            resolver.resolve("閶"),
            Resolution::Unresolved(UnresolvedReason::NoRecord)
        );
    }
}

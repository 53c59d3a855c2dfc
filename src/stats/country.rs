// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Country name normalization across inconsistent geocoder vocabularies

/// Ordered `(substring, canonical name)` rules; the first rule whose
/// substring occurs in the input wins.
pub const COUNTRY_RULES: &[(&str, &str)] = &[
    ("美利坚合众国", "美国"),
    ("英国", "英国"),
    ("印度尼西亚", "印度尼西亚"),
    ("韩国", "韩国"),
    ("斯里兰卡", "斯里兰卡"),
    ("所罗门群岛", "所罗门群岛"),
    ("拉脱维亚", "拉脱维亚"),
    ("爱沙尼亚", "爱沙尼亚"),
    // Traditional-character spelling
    ("奧地利", "奥地利"),
    ("澳大利亚", "澳大利亚"),
];

/// Canonical country name, or the input unchanged when no rule matches
pub fn normalize_country(country: &str) -> String {
    COUNTRY_RULES
        .iter()
        .find(|(needle, _)| country.contains(needle))
        .map_or_else(|| country.to_string(), |(_, canonical)| (*canonical).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_long_form_names() {
        assert_eq!(normalize_country("美利坚合众国"), "美国");
        assert_eq!(normalize_country("大不列颠及北爱尔兰联合王国 英国"), "英国");
        assert_eq!(normalize_country("大韩民国 韩国"), "韩国");
        assert_eq!(normalize_country("奧地利共和国"), "奥地利");
    }

    #[test]
    fn test_unknown_passes_through() {
        assert_eq!(normalize_country("中国"), "中国");
        assert_eq!(normalize_country("日本"), "日本");
        assert_eq!(normalize_country(""), "");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "美利坚合众国",
            "英国",
            "奧地利",
            "澳大利亚联邦",
            "中国",
            "所罗门群岛",
            "",
        ];
        for sample in samples {
            let once = normalize_country(sample);
            assert_eq!(normalize_country(&once), once, "not idempotent for {sample}");
        }
    }

    #[test]
    fn test_canonical_names_map_to_themselves() {
        for (_, canonical) in COUNTRY_RULES {
            assert_eq!(normalize_country(canonical), *canonical);
        }
    }
}

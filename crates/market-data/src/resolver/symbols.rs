//! Bundled fallback table of liquid KRX names.
//!
//! Consulted only after every upstream search came back empty, so a cold
//! upstream outage still lets well-known names resolve to their codes.

use crate::constants::MAX_SEARCH_RESULTS;
use crate::models::SearchResult;

pub(crate) const KNOWN_SYMBOLS: &[(&str, &str)] = &[
    ("삼성전자", "005930"),
    ("삼성전자우", "005935"),
    ("SK하이닉스", "000660"),
    ("LG에너지솔루션", "373220"),
    ("삼성바이오로직스", "207940"),
    ("현대차", "005380"),
    ("기아", "000270"),
    ("NAVER", "035420"),
    ("네이버", "035420"),
    ("카카오", "035720"),
    ("KB금융", "105560"),
    ("신한지주", "055550"),
    ("삼성물산", "028260"),
    ("POSCO홀딩스", "005490"),
    ("포스코홀딩스", "005490"),
    ("LG화학", "051910"),
    ("삼성SDI", "006400"),
    ("현대모비스", "012330"),
    ("LG전자", "066570"),
    ("SK이노베이션", "096770"),
    ("셀트리온", "068270"),
    ("삼성생명", "032830"),
    ("SK텔레콤", "017670"),
    ("KT&G", "033780"),
    ("LG생활건강", "051900"),
    ("한국전력", "015760"),
    ("삼성화재", "000810"),
    ("HD현대중공업", "329180"),
    ("기업은행", "024110"),
    ("우리금융지주", "316140"),
    ("하나금융지주", "086790"),
    ("SK", "034730"),
    ("LG", "003550"),
    ("한화에어로스페이스", "012450"),
    ("한국항공우주", "047810"),
    ("현대로템", "064350"),
    ("두산에너빌리티", "034020"),
    ("에코프로비엠", "247540"),
    ("알테오젠", "196170"),
    ("에코프로", "086520"),
    ("크래프톤", "259960"),
    ("펄어비스", "263750"),
    ("SK바이오팜", "326030"),
    ("SK스퀘어", "402340"),
    ("삼성전기", "009150"),
    ("고려아연", "010130"),
    ("포스코퓨처엠", "003670"),
    ("KT", "030200"),
    ("한화", "000880"),
    ("KODEX 200", "069500"),
    ("KODEX 레버리지", "122630"),
    ("KODEX 인버스", "114800"),
    ("TIGER 200", "102110"),
    ("TIGER 미국S&P500", "360750"),
    ("TIGER 미국나스닥100", "133690"),
    ("KODEX 미국S&P500", "379800"),
];

/// Case-insensitive substring scan over the bundled table.
pub(crate) fn builtin_matches(query: &str) -> Vec<SearchResult> {
    let needle = query.to_lowercase();
    KNOWN_SYMBOLS
        .iter()
        .filter(|(name, _)| name.to_lowercase().contains(&needle))
        .take(MAX_SEARCH_RESULTS)
        .map(|(name, code)| SearchResult::new(*name, *code))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substring_match() {
        let results = builtin_matches("삼성전자");
        assert!(results.iter().any(|r| r.code == "005930"));
        assert!(results.iter().any(|r| r.code == "005935"));
    }

    #[test]
    fn test_case_insensitive_match() {
        let results = builtin_matches("naver");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].code, "035420");
    }

    #[test]
    fn test_unknown_name_is_empty() {
        assert!(builtin_matches("없는종목").is_empty());
    }

    #[test]
    fn test_result_cap() {
        // single-letter query hits many table entries but never exceeds the cap
        assert!(builtin_matches("K").len() <= MAX_SEARCH_RESULTS);
    }
}

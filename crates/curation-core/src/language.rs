//! Mapping between the two-letter codes used in curation configs and the
//! ISO 639-3 codes whatlang reports.
//!
//! Codes follow ISO 639-1 where one exists, with `zh-cn` for Mandarin.
//! Languages without a two-letter code fall back to whatlang's own code.

use whatlang::Lang;

use crate::LanguageCode;

/// `(curation code, whatlang code)` pairs.
const CODE_TABLE: &[(&str, &str)] = &[
    ("af", "afr"),
    ("ak", "aka"),
    ("am", "amh"),
    ("ar", "ara"),
    ("az", "aze"),
    ("be", "bel"),
    ("bg", "bul"),
    ("bn", "ben"),
    ("ca", "cat"),
    ("cs", "ces"),
    ("da", "dan"),
    ("de", "deu"),
    ("el", "ell"),
    ("en", "eng"),
    ("eo", "epo"),
    ("es", "spa"),
    ("et", "est"),
    ("fa", "pes"),
    ("fi", "fin"),
    ("fr", "fra"),
    ("gu", "guj"),
    ("he", "heb"),
    ("hi", "hin"),
    ("hr", "hrv"),
    ("hu", "hun"),
    ("hy", "hye"),
    ("id", "ind"),
    ("it", "ita"),
    ("ja", "jpn"),
    ("jv", "jav"),
    ("ka", "kat"),
    ("km", "khm"),
    ("kn", "kan"),
    ("ko", "kor"),
    ("la", "lat"),
    ("lt", "lit"),
    ("lv", "lav"),
    ("mk", "mkd"),
    ("ml", "mal"),
    ("mr", "mar"),
    ("my", "mya"),
    ("ne", "nep"),
    ("nl", "nld"),
    ("no", "nob"),
    ("or", "ori"),
    ("pa", "pan"),
    ("pl", "pol"),
    ("pt", "por"),
    ("ro", "ron"),
    ("ru", "rus"),
    ("si", "sin"),
    ("sk", "slk"),
    ("sl", "slv"),
    ("sn", "sna"),
    ("sr", "srp"),
    ("sv", "swe"),
    ("ta", "tam"),
    ("te", "tel"),
    ("th", "tha"),
    ("tk", "tuk"),
    ("tl", "tgl"),
    ("tr", "tur"),
    ("uk", "ukr"),
    ("ur", "urd"),
    ("uz", "uzb"),
    ("vi", "vie"),
    ("yi", "yid"),
    ("zh-cn", "cmn"),
    ("zu", "zul"),
];

/// Resolve a curation language code to a whatlang language.
///
/// Accepts the two-letter codes from [`CODE_TABLE`] as well as raw ISO 639-3
/// codes. Returns `None` for codes whatlang does not support.
pub fn to_whatlang(code: &str) -> Option<Lang> {
    let code = code.trim().to_ascii_lowercase();
    let three = CODE_TABLE
        .iter()
        .find(|(two, _)| *two == code)
        .map(|(_, three)| *three)
        .unwrap_or(code.as_str());
    Lang::from_code(three)
}

/// The curation code for a whatlang language.
pub fn from_whatlang(lang: Lang) -> LanguageCode {
    let three = lang.code();
    CODE_TABLE
        .iter()
        .find(|(_, t)| *t == three)
        .map(|(two, _)| two.to_string())
        .unwrap_or_else(|| three.to_string())
}

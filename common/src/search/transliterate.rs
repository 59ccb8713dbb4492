//! Romaji to kana conversion for the search box.
//!
//! The whole field is re-converted on every keystroke, so the transform must
//! leave its own output alone: kana and any other non-Latin text pass through,
//! and a trailing `n` stays Latin until the next key decides between `ん` and
//! `な`/`に`/...

use std::fmt;
use std::str::FromStr;

/// Script the search input is converted into as the user types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchScript {
    /// No conversion.
    Latin,
    Hiragana,
    #[default]
    Katakana,
}

const KATAKANA_OFFSET: u32 = 0x60;

impl SearchScript {
    pub fn transliterate(&self, input: &str) -> String {
        match self {
            SearchScript::Latin => input.to_string(),
            SearchScript::Hiragana => romaji_to_kana(input, false),
            SearchScript::Katakana => romaji_to_kana(input, true),
        }
    }
}

impl FromStr for SearchScript {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "latin" | "none" => Ok(SearchScript::Latin),
            "hiragana" => Ok(SearchScript::Hiragana),
            "katakana" => Ok(SearchScript::Katakana),
            other => Err(format!(
                "unknown script {other:?}, expected latin, hiragana or katakana"
            )),
        }
    }
}

impl fmt::Display for SearchScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SearchScript::Latin => "latin",
            SearchScript::Hiragana => "hiragana",
            SearchScript::Katakana => "katakana",
        })
    }
}

fn romaji_to_kana(input: &str, katakana: bool) -> String {
    let chars: Vec<char> = input.chars().collect();
    let lower: Vec<char> = chars.iter().map(|c| c.to_ascii_lowercase()).collect();
    let mut out = String::with_capacity(input.len() * 3);
    let push = |out: &mut String, kana: &str| {
        if katakana {
            out.extend(kana.chars().map(to_katakana));
        } else {
            out.push_str(kana);
        }
    };

    let mut i = 0;
    while i < chars.len() {
        let c = lower[i];
        let next = lower.get(i + 1).copied();

        if c == '-' {
            out.push('ー');
            i += 1;
            continue;
        }
        if !c.is_ascii_alphabetic() {
            out.push(chars[i]);
            i += 1;
            continue;
        }

        if c == 'n' {
            match next {
                None => {
                    out.push(chars[i]);
                    i += 1;
                    continue;
                }
                Some('n') => {
                    push(&mut out, "ん");
                    i += 2;
                    continue;
                }
                Some(n) if !is_vowel(n) && n != 'y' => {
                    push(&mut out, "ん");
                    i += if n == '\'' { 2 } else { 1 };
                    continue;
                }
                _ => {}
            }
        }

        // doubled consonant, and "tch" as in "matcha"
        if !is_vowel(c) && (next == Some(c) || (c == 't' && next == Some('c'))) {
            push(&mut out, "っ");
            i += 1;
            continue;
        }

        let matched = (1..=3).rev().find_map(|len| {
            let end = i + len;
            if end > lower.len() {
                return None;
            }
            let syllable: String = lower[i..end].iter().collect();
            syllable_to_hiragana(&syllable).map(|kana| (kana, len))
        });

        match matched {
            Some((kana, len)) => {
                push(&mut out, kana);
                i += len;
            }
            None => {
                out.push(chars[i]);
                i += 1;
            }
        }
    }
    out
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'i' | 'u' | 'e' | 'o')
}

fn to_katakana(c: char) -> char {
    match c {
        '\u{3041}'..='\u{3096}' => char::from_u32(c as u32 + KATAKANA_OFFSET).unwrap_or(c),
        _ => c,
    }
}

fn syllable_to_hiragana(syllable: &str) -> Option<&'static str> {
    let kana = match syllable {
        "a" => "あ", "i" => "い", "u" => "う", "e" => "え", "o" => "お",

        "ka" => "か", "ki" => "き", "ku" => "く", "ke" => "け", "ko" => "こ",
        "kya" => "きゃ", "kyu" => "きゅ", "kyo" => "きょ",

        "sa" => "さ", "shi" | "si" => "し", "su" => "す", "se" => "せ", "so" => "そ",
        "sha" | "sya" => "しゃ", "shu" | "syu" => "しゅ", "sho" | "syo" => "しょ", "she" => "しぇ",

        "ta" => "た", "chi" | "ti" => "ち", "tsu" | "tu" => "つ", "te" => "て", "to" => "と",
        "cha" | "tya" => "ちゃ", "chu" | "tyu" => "ちゅ", "cho" | "tyo" => "ちょ", "che" => "ちぇ",

        "na" => "な", "ni" => "に", "nu" => "ぬ", "ne" => "ね", "no" => "の",
        "nya" => "にゃ", "nyu" => "にゅ", "nyo" => "にょ",

        "ha" => "は", "hi" => "ひ", "fu" | "hu" => "ふ", "he" => "へ", "ho" => "ほ",
        "hya" => "ひゃ", "hyu" => "ひゅ", "hyo" => "ひょ",
        "fa" => "ふぁ", "fi" => "ふぃ", "fe" => "ふぇ", "fo" => "ふぉ",

        "ma" => "ま", "mi" => "み", "mu" => "む", "me" => "め", "mo" => "も",
        "mya" => "みゃ", "myu" => "みゅ", "myo" => "みょ",

        "ya" => "や", "yu" => "ゆ", "yo" => "よ",

        "ra" => "ら", "ri" => "り", "ru" => "る", "re" => "れ", "ro" => "ろ",
        "rya" => "りゃ", "ryu" => "りゅ", "ryo" => "りょ",

        "wa" => "わ", "wo" => "を",

        "ga" => "が", "gi" => "ぎ", "gu" => "ぐ", "ge" => "げ", "go" => "ご",
        "gya" => "ぎゃ", "gyu" => "ぎゅ", "gyo" => "ぎょ",

        "za" => "ざ", "ji" | "zi" => "じ", "zu" => "ず", "ze" => "ぜ", "zo" => "ぞ",
        "ja" | "jya" | "zya" => "じゃ", "ju" | "jyu" | "zyu" => "じゅ",
        "jo" | "jyo" | "zyo" => "じょ", "je" => "じぇ",

        "da" => "だ", "di" => "ぢ", "du" => "づ", "de" => "で", "do" => "ど",
        "dya" => "ぢゃ", "dyu" => "ぢゅ", "dyo" => "ぢょ",

        "ba" => "ば", "bi" => "び", "bu" => "ぶ", "be" => "べ", "bo" => "ぼ",
        "bya" => "びゃ", "byu" => "びゅ", "byo" => "びょ",

        "pa" => "ぱ", "pi" => "ぴ", "pu" => "ぷ", "pe" => "ぺ", "po" => "ぽ",
        "pya" => "ぴゃ", "pyu" => "ぴゅ", "pyo" => "ぴょ",

        "vu" => "ゔ",
        _ => return None,
    };
    Some(kana)
}

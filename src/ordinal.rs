//! English cardinal spelling for ordinal keys (`key_one`, `key_two`, ...).
//!
//! The spelling is part of the persisted layout, so it follows the exact
//! conventions existing schema files were produced with:
//! `twenty-one`, `one hundred and one`, `one thousand, two hundred and
//! thirty-four`, and ` and ` before a trailing group below one hundred
//! (`one thousand and five`).

const UNITS: [&str; 10] = [
    "", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
];
const TEENS: [&str; 10] = [
    "ten", "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen",
    "eighteen", "nineteen",
];
const TENS: [&str; 10] = [
    "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];
const SCALES: [&str; 7] = [
    "",
    "thousand",
    "million",
    "billion",
    "trillion",
    "quadrillion",
    "quintillion",
];

pub fn ordinal_key(position: u64) -> String {
    format!("key_{}", number_to_words(position))
}

pub fn number_to_words(n: u64) -> String {
    if n == 0 {
        return "zero".to_string();
    }

    // non-zero groups of three digits, most significant first
    let mut groups = Vec::new();
    let mut rest = n;
    let mut scale = 0;
    while rest > 0 {
        let group = rest % 1000;
        if group != 0 {
            groups.push((scale, group));
        }
        rest /= 1000;
        scale += 1;
    }
    groups.reverse();

    let last = groups.len() - 1;
    let mut out = String::new();
    for (i, &(scale, group)) in groups.iter().enumerate() {
        if i > 0 {
            let trailing_small = i == last && scale == 0 && group < 100;
            out.push_str(if trailing_small { " and " } else { ", " });
        }
        out.push_str(&below_thousand(group));
        if scale > 0 {
            out.push(' ');
            out.push_str(SCALES[scale]);
        }
    }
    out
}

fn below_thousand(n: u64) -> String {
    let (hundreds, rest) = ((n / 100) as usize, n % 100);
    match (hundreds, rest) {
        (0, rest) => below_hundred(rest),
        (h, 0) => format!("{} hundred", UNITS[h]),
        (h, rest) => format!("{} hundred and {}", UNITS[h], below_hundred(rest)),
    }
}

fn below_hundred(n: u64) -> String {
    let (tens, units) = ((n / 10) as usize, (n % 10) as usize);
    match (tens, units) {
        (0, u) => UNITS[u].to_string(),
        (1, u) => TEENS[u].to_string(),
        (t, 0) => TENS[t].to_string(),
        (t, u) => format!("{}-{}", TENS[t], UNITS[u]),
    }
}

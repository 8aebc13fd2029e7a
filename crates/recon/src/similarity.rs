//! Syntactic similarity between text fragments.
//!
//! Every score blends independent signals (character alignment, word-set
//! overlap, plus either a containment bonus or domain-keyword overlap) and
//! is bounded to `[0, 1]`, rounded to 3 decimals. Nothing here is semantic.

use std::collections::{BTreeSet, HashMap};

use crate::normalize::{normalize, words};

const TITLE_SEQUENCE_WEIGHT: f64 = 0.4;
const TITLE_WORD_WEIGHT: f64 = 0.4;
const TITLE_CONTAINMENT_WEIGHT: f64 = 0.2;
/// Bonus awarded when one title literally contains the other.
const CONTAINMENT_BONUS: f64 = 0.8;
/// Both normalized titles must be longer than this for containment to count.
const CONTAINMENT_MIN_CHARS: usize = 10;

const CONTENT_SEQUENCE_WEIGHT: f64 = 0.3;
const CONTENT_WORD_WEIGHT: f64 = 0.4;
const CONTENT_KEYWORD_WEIGHT: f64 = 0.3;

/// Startup/product vocabulary used for the keyword-overlap term.
pub const DEFAULT_KEYWORDS: &[&str] = &[
    "app", "tool", "saas", "startup", "business", "ai", "platform", "service",
    "software", "website", "mobile", "web", "api", "integration", "automation",
    "productivity", "marketing", "sales", "analytics", "data", "user", "customer",
    "revenue", "growth", "validation", "mvp", "beta", "launch", "market",
    "industry", "solution", "problem", "feature", "functionality",
];

/// Similarity between two short titles.
///
/// `0.4 * sequence + 0.4 * word_overlap + 0.2 * containment`, where
/// containment is 0.8 when both normalized titles exceed 10 characters and
/// one contains the other. Titles that are equal after normalization score
/// exactly 1.0; an empty side scores 0.
pub fn title_similarity(a: &str, b: &str) -> f64 {
    let norm_a = normalize(a);
    let norm_b = normalize(b);

    if norm_a.is_empty() || norm_b.is_empty() {
        return 0.0;
    }
    if norm_a == norm_b {
        return 1.0;
    }

    let sequence = sequence_ratio(&norm_a, &norm_b);
    let overlap = word_overlap(&norm_a, &norm_b);

    let containment = if norm_a.chars().count() > CONTAINMENT_MIN_CHARS
        && norm_b.chars().count() > CONTAINMENT_MIN_CHARS
        && (norm_a.contains(norm_b.as_str()) || norm_b.contains(norm_a.as_str()))
    {
        CONTAINMENT_BONUS
    } else {
        0.0
    };

    round3(
        TITLE_SEQUENCE_WEIGHT * sequence
            + TITLE_WORD_WEIGHT * overlap
            + TITLE_CONTAINMENT_WEIGHT * containment,
    )
}

/// Similarity between a summary's content and a detail's introduction,
/// using the built-in keyword vocabulary.
pub fn content_similarity(content: &str, introduction: &str) -> f64 {
    content_similarity_with(content, introduction, DEFAULT_KEYWORDS)
}

/// [`content_similarity`] against a caller-supplied keyword vocabulary.
///
/// `0.3 * sequence + 0.4 * word_overlap + 0.3 * keyword_overlap`. Keyword
/// hits are case-insensitive substring tests on the lowered raw text.
pub fn content_similarity_with<S: AsRef<str>>(
    content: &str,
    introduction: &str,
    keywords: &[S],
) -> f64 {
    let norm_content = normalize(content);
    let norm_intro = normalize(introduction);

    if norm_content.is_empty() || norm_intro.is_empty() {
        return 0.0;
    }

    let sequence = sequence_ratio(&norm_content, &norm_intro);
    let overlap = word_overlap(&norm_content, &norm_intro);
    let keyword = keyword_overlap(
        &content.to_lowercase(),
        &introduction.to_lowercase(),
        keywords,
    );

    round3(
        CONTENT_SEQUENCE_WEIGHT * sequence
            + CONTENT_WORD_WEIGHT * overlap
            + CONTENT_KEYWORD_WEIGHT * keyword,
    )
}

/// Jaccard index over the word sets of two normalized strings.
fn word_overlap(a: &str, b: &str) -> f64 {
    let set_a: BTreeSet<&str> = words(a).collect();
    let set_b: BTreeSet<&str> = words(b).collect();

    if set_a.is_empty() || set_b.is_empty() {
        return 0.0;
    }

    let intersection = set_a.intersection(&set_b).count();
    let union = set_a.union(&set_b).count();
    intersection as f64 / union as f64
}

/// `|terms in both| / max(|terms in a|, |terms in b|)`, 0 unless both texts
/// hit at least one term.
fn keyword_overlap<S: AsRef<str>>(lower_a: &str, lower_b: &str, keywords: &[S]) -> f64 {
    let mut in_a = 0usize;
    let mut in_b = 0usize;
    let mut in_both = 0usize;

    for term in keywords {
        let term = term.as_ref().to_lowercase();
        if term.is_empty() {
            continue;
        }
        let hit_a = lower_a.contains(&term);
        let hit_b = lower_b.contains(&term);
        in_a += hit_a as usize;
        in_b += hit_b as usize;
        in_both += (hit_a && hit_b) as usize;
    }

    if in_a == 0 || in_b == 0 {
        return 0.0;
    }
    in_both as f64 / in_a.max(in_b) as f64
}

/// Ratcliff/Obershelp ratio: `2 * M / T` where `M` is the number of
/// characters in the longest-matching-blocks decomposition and `T` the
/// combined length. The pair is put in a canonical order first so the
/// result does not depend on argument order.
pub fn sequence_ratio(a: &str, b: &str) -> f64 {
    let (first, second) = if a <= b { (a, b) } else { (b, a) };
    let a: Vec<char> = first.chars().collect();
    let b: Vec<char> = second.chars().collect();

    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matching_chars(&a, &b) as f64 / total as f64
}

fn matching_chars(a: &[char], b: &[char]) -> usize {
    let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
    for (j, &c) in b.iter().enumerate() {
        b2j.entry(c).or_default().push(j);
    }

    let mut matched = 0;
    let mut queue = vec![(0, a.len(), 0, b.len())];

    while let Some((alo, ahi, blo, bhi)) = queue.pop() {
        let (i, j, k) = longest_match(a, &b2j, alo, ahi, blo, bhi);
        if k == 0 {
            continue;
        }
        matched += k;
        if alo < i && blo < j {
            queue.push((alo, i, blo, j));
        }
        if i + k < ahi && j + k < bhi {
            queue.push((i + k, ahi, j + k, bhi));
        }
    }

    matched
}

/// Longest common block of `a[alo..ahi]` and `b[blo..bhi]`.
/// Ties go to the block starting earliest in `a`, then earliest in `b`.
fn longest_match(
    a: &[char],
    b2j: &HashMap<char, Vec<usize>>,
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0);
    // j2len[j] = length of the match ending at a[i - 1], b[j]
    let mut j2len: HashMap<usize, usize> = HashMap::new();

    for (i, ch) in a.iter().enumerate().take(ahi).skip(alo) {
        let mut next: HashMap<usize, usize> = HashMap::new();
        if let Some(positions) = b2j.get(ch) {
            for &j in positions {
                if j < blo {
                    continue;
                }
                if j >= bhi {
                    break;
                }
                let prev = if j > 0 { j2len.get(&(j - 1)).copied().unwrap_or(0) } else { 0 };
                let k = prev + 1;
                next.insert(j, k);
                if k > best_size {
                    best_i = i + 1 - k;
                    best_j = j + 1 - k;
                    best_size = k;
                }
            }
        }
        j2len = next;
    }

    (best_i, best_j, best_size)
}

fn round3(value: f64) -> f64 {
    ((value * 1000.0).round() / 1000.0).clamp(0.0, 1.0)
}

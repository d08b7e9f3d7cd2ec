//! Matchmaking pairwise scorer and ranking policy.
//!
//! Scores one requester profile against each candidate profile in the same
//! event and produces a bounded heuristic score with a displayable
//! justification. The score is a capped sum of weighted set overlaps, not a
//! probability.

use std::collections::HashSet;

use uuid::Uuid;

use crate::models::MatchProfile;

/// Weight per shared interest.
pub const INTEREST_WEIGHT: f64 = 0.2;
/// Cap on the shared-interest contribution.
pub const INTEREST_CAP: f64 = 0.6;
/// Weight per shared goal.
pub const GOAL_WEIGHT: f64 = 0.15;
/// Cap on the shared-goal contribution.
pub const GOAL_CAP: f64 = 0.4;
/// Flat bonus when the pair's goals complement each other.
pub const COMPLEMENTARY_BONUS: f64 = 0.3;
/// Weight per shared bio token.
pub const BIO_TOKEN_WEIGHT: f64 = 0.05;
/// Cap on the bio-overlap contribution.
pub const BIO_TOKEN_CAP: f64 = 0.2;
/// Bio tokens this short carry no signal.
pub const MIN_BIO_TOKEN_LEN: usize = 4;

/// Candidates scoring at or below this threshold are discarded.
pub const MIN_SCORE: f64 = 0.1;
/// Maximum number of suggestions kept per requester and event.
pub const MAX_SUGGESTIONS: usize = 10;

/// Separator between individual reason fragments.
pub const REASON_SEPARATOR: &str = " • ";

/// Goal pairs considered naturally matching, in either direction.
const COMPLEMENTARY_GOALS: [(&str, &str); 2] =
    [("recrutement", "networking"), ("vente", "achat")];

/// Maximum shared-interest examples cited in the reason text.
const MAX_INTEREST_EXAMPLES: usize = 3;
/// Maximum shared-goal examples cited in the reason text.
const MAX_GOAL_EXAMPLES: usize = 2;

/// Score and justification for one requester/candidate pair.
#[derive(Debug, Clone, PartialEq)]
pub struct PairScore {
    /// Heuristic relevance in [0, 1].
    pub score: f64,
    /// Reason fragments joined with [`REASON_SEPARATOR`]; empty when no
    /// contributing term produced text.
    pub reason: String,
}

/// A candidate that survived filtering, in rank order.
#[derive(Debug, Clone)]
pub struct RankedSuggestion {
    pub user_id: Uuid,
    pub score: f64,
    pub reason: String,
}

/// Scores a single requester/candidate pair.
pub fn score_pair(requester: &MatchProfile, candidate: &MatchProfile) -> PairScore {
    let mut score = 0.0;
    let mut reasons: Vec<String> = Vec::new();

    // Shared interests
    let shared_interests = shared_values(&requester.interests, &candidate.interests);
    if !shared_interests.is_empty() {
        let count = shared_interests.len();
        score += (count as f64 * INTEREST_WEIGHT).min(INTEREST_CAP);
        reasons.push(format!(
            "{} intérêt(s) commun(s): {}",
            count,
            shared_interests
                .iter()
                .take(MAX_INTEREST_EXAMPLES)
                .cloned()
                .collect::<Vec<_>>()
                .join(", ")
        ));
    }

    // Shared goals
    let shared_goals = shared_values(&requester.goals, &candidate.goals);
    if !shared_goals.is_empty() {
        let count = shared_goals.len();
        score += (count as f64 * GOAL_WEIGHT).min(GOAL_CAP);
        reasons.push(format!(
            "{} objectif(s) commun(s): {}",
            count,
            shared_goals
                .iter()
                .take(MAX_GOAL_EXAMPLES)
                .cloned()
                .collect::<Vec<_>>()
                .join(", ")
        ));
    }

    // Complementary intent
    if goals_complement(&requester.goals, &candidate.goals) {
        score += COMPLEMENTARY_BONUS;
        reasons.push("Objectifs complémentaires".to_string());
    }

    // Bio overlap is a silent tie-breaker: no reason text
    score += bio_overlap_contribution(requester.bio.as_deref(), candidate.bio.as_deref());

    PairScore {
        score: score.min(1.0),
        reason: reasons.join(REASON_SEPARATOR),
    }
}

/// Scores all candidates, drops those at or below [`MIN_SCORE`], and keeps
/// the best [`MAX_SUGGESTIONS`] in descending score order.
///
/// The sort is stable; ordering among equal scores follows candidate input
/// order and is not part of the contract.
pub fn rank_candidates(
    requester: &MatchProfile,
    candidates: &[MatchProfile],
) -> Vec<RankedSuggestion> {
    let mut ranked: Vec<RankedSuggestion> = candidates
        .iter()
        .filter(|c| c.user_id != requester.user_id)
        .map(|candidate| {
            let pair = score_pair(requester, candidate);
            RankedSuggestion {
                user_id: candidate.user_id,
                score: pair.score,
                reason: pair.reason,
            }
        })
        .filter(|s| s.score > MIN_SCORE)
        .collect();

    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked.truncate(MAX_SUGGESTIONS);
    ranked
}

/// Values present in both lists, deduplicated, in `left` order.
fn shared_values(left: &[String], right: &[String]) -> Vec<String> {
    let right_set: HashSet<&str> = right.iter().map(String::as_str).collect();
    let mut seen: HashSet<&str> = HashSet::new();
    left.iter()
        .filter(|v| right_set.contains(v.as_str()) && seen.insert(v.as_str()))
        .cloned()
        .collect()
}

/// Whether any complementary goal pair is present, in either direction.
fn goals_complement(requester_goals: &[String], candidate_goals: &[String]) -> bool {
    let requester: HashSet<&str> = requester_goals.iter().map(String::as_str).collect();
    let candidate: HashSet<&str> = candidate_goals.iter().map(String::as_str).collect();

    COMPLEMENTARY_GOALS.iter().any(|(a, b)| {
        (requester.contains(a) && candidate.contains(b))
            || (requester.contains(b) && candidate.contains(a))
    })
}

/// Weighted count of shared lowercase whitespace tokens longer than three
/// characters, capped.
fn bio_overlap_contribution(requester_bio: Option<&str>, candidate_bio: Option<&str>) -> f64 {
    let (Some(left), Some(right)) = (requester_bio, candidate_bio) else {
        return 0.0;
    };
    if left.is_empty() || right.is_empty() {
        return 0.0;
    }

    let tokens = |text: &str| -> HashSet<String> {
        text.to_lowercase()
            .split_whitespace()
            .filter(|t| t.len() >= MIN_BIO_TOKEN_LEN)
            .map(|t| t.to_string())
            .collect()
    };

    let shared = tokens(left).intersection(&tokens(right)).count();
    (shared as f64 * BIO_TOKEN_WEIGHT).min(BIO_TOKEN_CAP)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn profile(interests: &[&str], goals: &[&str]) -> MatchProfile {
        MatchProfile {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            event_id: Uuid::new_v4(),
            headline: None,
            bio: None,
            interests: interests.iter().map(|s| s.to_string()).collect(),
            goals: goals.iter().map(|s| s.to_string()).collect(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn profile_with_bio(interests: &[&str], goals: &[&str], bio: &str) -> MatchProfile {
        let mut p = profile(interests, goals);
        p.bio = Some(bio.to_string());
        p
    }

    #[test]
    fn test_one_shared_interest() {
        let pair = score_pair(&profile(&["AI"], &[]), &profile(&["AI"], &[]));
        assert!((pair.score - 0.2).abs() < 1e-9);
        assert_eq!(pair.reason, "1 intérêt(s) commun(s): AI");
    }

    #[test]
    fn test_interest_contribution_is_capped() {
        let many: Vec<&str> = vec!["a", "b", "c", "d", "e", "f", "g"];
        let pair = score_pair(&profile(&many, &[]), &profile(&many, &[]));
        // 7 * 0.2 would be 1.4; capped at 0.6
        assert!((pair.score - 0.6).abs() < 1e-9);
        assert!(pair.reason.starts_with("7 intérêt(s) commun(s): a, b, c"));
    }

    #[test]
    fn test_interest_examples_limited_to_three() {
        let many: Vec<&str> = vec!["a", "b", "c", "d"];
        let pair = score_pair(&profile(&many, &[]), &profile(&many, &[]));
        assert_eq!(pair.reason, "4 intérêt(s) commun(s): a, b, c");
    }

    #[test]
    fn test_shared_goals_scoring() {
        let pair = score_pair(
            &profile(&[], &["networking", "vente"]),
            &profile(&[], &["networking", "vente"]),
        );
        // 2 * 0.15 shared goals; vente/achat does not complement itself
        assert!((pair.score - 0.3).abs() < 1e-9);
        assert_eq!(pair.reason, "2 objectif(s) commun(s): networking, vente");
    }

    #[test]
    fn test_goal_contribution_is_capped() {
        let goals: Vec<&str> = vec!["g1", "g2", "g3", "g4", "g5"];
        let pair = score_pair(&profile(&[], &goals), &profile(&[], &goals));
        // 5 * 0.15 would be 0.75; capped at 0.4
        assert!((pair.score - 0.4).abs() < 1e-9);
        assert_eq!(pair.reason, "5 objectif(s) commun(s): g1, g2");
    }

    #[test]
    fn test_complementary_goals_both_directions() {
        for (a, b) in [
            ("recrutement", "networking"),
            ("networking", "recrutement"),
            ("vente", "achat"),
            ("achat", "vente"),
        ] {
            let pair = score_pair(&profile(&[], &[a]), &profile(&[], &[b]));
            assert!((pair.score - 0.3).abs() < 1e-9, "{} / {}", a, b);
            assert_eq!(pair.reason, "Objectifs complémentaires");
        }
    }

    #[test]
    fn test_worked_example() {
        // Requester {AI, Marketing / recrutement} vs candidate {AI / networking}:
        // 0.2 shared interest + 0.3 complementary = 0.5
        let requester = profile(&["AI", "Marketing"], &["recrutement"]);
        let candidate = profile(&["AI"], &["networking"]);

        let pair = score_pair(&requester, &candidate);
        assert!((pair.score - 0.5).abs() < 1e-9);
        assert!(pair.reason.contains("1 intérêt(s) commun(s): AI"));
        assert!(pair.reason.contains("Objectifs complémentaires"));
        assert_eq!(
            pair.reason,
            format!(
                "1 intérêt(s) commun(s): AI{}Objectifs complémentaires",
                REASON_SEPARATOR
            )
        );
    }

    #[test]
    fn test_bio_overlap_is_silent() {
        let left = profile_with_bio(&[], &[], "Building distributed databases since 2010");
        let right = profile_with_bio(&[], &[], "distributed databases enthusiast");

        let pair = score_pair(&left, &right);
        // "distributed" and "databases" shared: 2 * 0.05
        assert!((pair.score - 0.1).abs() < 1e-9);
        assert!(pair.reason.is_empty());
    }

    #[test]
    fn test_bio_short_tokens_ignored() {
        let left = profile_with_bio(&[], &[], "we do ai ml ops");
        let right = profile_with_bio(&[], &[], "we do ai ml ops");
        assert_eq!(score_pair(&left, &right).score, 0.0);
    }

    #[test]
    fn test_bio_tokens_lowercased() {
        let left = profile_with_bio(&[], &[], "ROBOTICS expert");
        let right = profile_with_bio(&[], &[], "robotics Expert");
        // "robotics" and "expert" both match after lowercasing
        assert!((score_pair(&left, &right).score - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_bio_overlap_capped() {
        let text = "alpha bravo charlie delta echo foxtrot golf hotel";
        let pair = score_pair(
            &profile_with_bio(&[], &[], text),
            &profile_with_bio(&[], &[], text),
        );
        // 8 shared tokens * 0.05 would be 0.4; capped at 0.2
        assert!((pair.score - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_total_score_capped_at_one() {
        // All terms fire at their caps: 0.6 + 0.4 + 0.3 + 0.2 = 1.5
        let interests: Vec<&str> = vec!["i1", "i2", "i3"];
        let goals: Vec<&str> = vec!["recrutement", "g1", "g2", "g3"];
        let other_goals: Vec<&str> = vec!["networking", "g1", "g2", "g3"];
        let bio = "alpha bravo charlie delta echo foxtrot";

        let mut requester = profile_with_bio(&interests, &goals, bio);
        requester.goals.push("networking".to_string());
        let candidate = profile_with_bio(&interests, &other_goals, bio);

        let pair = score_pair(&requester, &candidate);
        assert_eq!(pair.score, 1.0);
    }

    #[test]
    fn test_score_always_in_unit_interval() {
        let cases = [
            (profile(&[], &[]), profile(&[], &[])),
            (profile(&["AI"], &["vente"]), profile(&["AI"], &["achat"])),
            (
                profile_with_bio(&["a", "b", "c", "d"], &["recrutement"], "long shared words"),
                profile_with_bio(&["a", "b", "c", "d"], &["networking"], "long shared words"),
            ),
        ];
        for (left, right) in cases {
            let pair = score_pair(&left, &right);
            assert!((0.0..=1.0).contains(&pair.score));
        }
    }

    #[test]
    fn test_duplicate_tags_counted_once() {
        let pair = score_pair(
            &profile(&["AI", "AI"], &[]),
            &profile(&["AI", "AI"], &[]),
        );
        assert!((pair.score - 0.2).abs() < 1e-9);
        assert_eq!(pair.reason, "1 intérêt(s) commun(s): AI");
    }

    #[test]
    fn test_rank_threshold_filtering() {
        let requester = profile(&["AI"], &[]);
        let kept = profile(&["AI"], &[]); // 0.2 > 0.1
        let dropped = profile(&["Quantum"], &[]); // 0.0

        let ranked = rank_candidates(&requester, &[dropped, kept.clone()]);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].user_id, kept.user_id);
    }

    #[test]
    fn test_rank_exact_threshold_excluded() {
        // Two shared bio tokens produce exactly 0.1, which must be dropped
        let requester = profile_with_bio(&[], &["solo"], "distributed databases rock");
        let candidate = profile_with_bio(&[], &["autre"], "distributed databases rule");

        let ranked = rank_candidates(&requester, &[candidate]);
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_rank_top_ten_descending() {
        // Express 15 distinct target scores as n * 0.05 for n in 4..=18,
        // decomposed into a shared interests (0.2 each), b shared goals
        // (0.15 each) and c shared bio tokens (0.05 each), all below caps.
        let mut requester = profile(&["i1", "i2", "i3"], &["g1", "g2"]);
        requester.bio = Some("tokenaa tokenbb tokencc".to_string());

        let candidates: Vec<MatchProfile> = (4..=18)
            .map(|n: usize| {
                let a = (n / 4).min(3);
                let rem = n - 4 * a;
                let b = (rem / 3).min(2);
                let c = rem - 3 * b;

                let mut cand = profile(&[], &[]);
                cand.interests = (1..=a).map(|i| format!("i{}", i)).collect();
                cand.goals = (1..=b).map(|g| format!("g{}", g)).collect();
                if c > 0 {
                    let tokens = ["tokenaa", "tokenbb", "tokencc"];
                    cand.bio = Some(tokens[..c].join(" "));
                }
                cand
            })
            .collect();

        let ranked = rank_candidates(&requester, &candidates);
        assert_eq!(ranked.len(), MAX_SUGGESTIONS);
        for pair in ranked.windows(2) {
            assert!(pair[0].score > pair[1].score);
        }
        // Best candidate: 3 interests + 2 goals + 0 bio tokens = 0.9
        assert!((ranked[0].score - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_rank_keeps_tagless_candidate_on_bio_overlap() {
        // A candidate with no interests or goals can still clear the
        // threshold on bio overlap alone: 3 shared tokens = 0.15 > 0.1.
        let requester = profile_with_bio(
            &["AI"],
            &["networking"],
            "building distributed databases consensus",
        );
        let candidate = profile_with_bio(&[], &[], "distributed databases consensus reading");

        let ranked = rank_candidates(&requester, &[candidate.clone()]);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].user_id, candidate.user_id);
        assert!((ranked[0].score - 0.15).abs() < 1e-9);
        assert!(ranked[0].reason.is_empty());
    }

    #[test]
    fn test_rank_excludes_requester() {
        let requester = profile(&["AI"], &[]);
        let mut same = profile(&["AI"], &[]);
        same.user_id = requester.user_id;

        assert!(rank_candidates(&requester, &[same]).is_empty());
    }

    #[test]
    fn test_rank_stable_for_equal_scores() {
        let requester = profile(&["AI"], &[]);
        let first = profile(&["AI"], &[]);
        let second = profile(&["AI"], &[]);

        let ranked = rank_candidates(&requester, &[first.clone(), second.clone()]);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].user_id, first.user_id);
        assert_eq!(ranked[1].user_id, second.user_id);
    }

    #[test]
    fn test_empty_candidate_pool() {
        assert!(rank_candidates(&profile(&["AI"], &[]), &[]).is_empty());
    }
}

use vocab_core::{
    compute_diversity_index, compute_readability_index, ScoringError, UnitScores, Word,
};

fn word(id: i64, title: &str) -> Word {
    Word {
        id,
        unit_id: 1,
        title: title.to_string(),
        translation: None,
        topic: None,
        completed: false,
    }
}

fn words(titles: &[&str]) -> Vec<Word> {
    titles
        .iter()
        .enumerate()
        .map(|(index, title)| word(index as i64 + 1, title))
        .collect()
}

#[test]
fn scoring_reads_titles_from_word_records() {
    let unit = words(&["run", "run_ning", "jump_ed"]);

    let readability = compute_readability_index(&unit).unwrap();
    assert!((readability - 36.62).abs() < 1e-9);
    assert_eq!(compute_diversity_index(&unit), 1.0);
}

#[test]
fn translation_and_topic_do_not_affect_scores() {
    let mut enriched = words(&["cat", "cat"]);
    enriched[0].translation = Some("a small feline".to_string());
    enriched[1].topic = Some("pets".to_string());

    assert_eq!(compute_diversity_index(&enriched), 0.5);
    assert_eq!(
        compute_readability_index(&enriched).unwrap(),
        compute_readability_index(&["cat", "cat"]).unwrap()
    );
}

#[test]
fn all_syllable_marked_unit_is_degenerate() {
    let unit = words(&["run_ning", "jump_ed", "sy_lla_ble"]);
    assert_eq!(
        compute_readability_index(&unit),
        Err(ScoringError::NoPlainWords { syllable_count: 3 })
    );

    let scores = UnitScores::compute(&unit);
    assert_eq!(scores.readability_index, None);
    assert_eq!(scores.diversity_index, 1.0);
}

#[test]
fn owned_titles_score_like_borrowed_titles() {
    let owned: Vec<String> = ["a", "b", "a", "c_d"].iter().map(|s| s.to_string()).collect();
    let borrowed = ["a", "b", "a", "c_d"];
    assert_eq!(
        UnitScores::compute(&owned),
        UnitScores::compute(&borrowed)
    );
}

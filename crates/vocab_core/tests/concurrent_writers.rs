use std::thread;
use vocab_core::db::open_db;
use vocab_core::{
    NewUnit, NewWord, OfflineDictionary, RosterService, SqliteWordRepository, UnitScores,
    WordRepository, WordService,
};

#[test]
fn concurrent_adds_to_one_unit_commit_scores_of_final_word_set() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shared.db");

    let unit_id = {
        let conn = open_db(&path).unwrap();
        RosterService::new(&conn)
            .create_unit(&NewUnit {
                name: "Shared".to_string(),
                student_id: None,
            })
            .unwrap()
            .id
    };

    let writers: Vec<_> = ["plain", "sy_lla_ble"]
        .into_iter()
        .map(|prefix| {
            let path = path.clone();
            thread::spawn(move || {
                let mut conn = open_db(&path).unwrap();
                let mut service = WordService::new(&mut conn, OfflineDictionary);
                for index in 0..10 {
                    let title = format!("{prefix}{index}");
                    service.add_word(unit_id, &NewWord::new(title)).unwrap();
                }
            })
        })
        .collect();
    for writer in writers {
        writer.join().unwrap();
    }

    let conn = open_db(&path).unwrap();
    let words = SqliteWordRepository::new(&conn).list_words(unit_id).unwrap();
    assert_eq!(words.len(), 20);

    let expected = UnitScores::compute(&words);
    let unit = RosterService::new(&conn).get_unit(unit_id).unwrap().unwrap();
    assert_eq!(unit.readability_index, expected.readability_index);
    assert_eq!(unit.diversity_index, Some(expected.diversity_index));
}

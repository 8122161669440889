use hmmtagger::quark::StringTable;
use hmmtagger::{decode, estimate, Error, HmmTagger, ScoreUnits, Smoothing, Tagger, TaggerConfig};

fn init_logger() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Debug)
        .try_init();
}

fn train() -> Vec<Vec<(&'static str, &'static str)>> {
    vec![
        vec![("the", "DET"), ("dog", "NOUN"), ("runs", "VERB"), (".", "PUNCT")],
        vec![("a", "DET"), ("cat", "NOUN"), ("sleeps", "VERB"), (".", "PUNCT")],
        vec![("the", "DET"), ("old", "ADJ"), ("man", "NOUN"), ("walks", "VERB"), (".", "PUNCT")],
        vec![("John", "PROPN"), ("runs", "VERB"), (".", "PUNCT")],
        vec![("Mary", "PROPN"), ("sees", "VERB"), ("the", "DET"), ("dog", "NOUN"), (".", "PUNCT")],
        vec![("the", "DET"), ("run", "NOUN"), ("was", "VERB"), ("long", "ADJ"), (".", "PUNCT")],
        vec![("they", "PRON"), ("run", "VERB"), ("fast", "ADV"), (".", "PUNCT")],
        vec![("we", "PRON"), ("see", "VERB"), ("a", "DET"), ("big", "ADJ"), ("cat", "NOUN"), (".", "PUNCT")],
    ]
}

#[test]
fn regression_fixture() {
    init_logger();
    let train = vec![vec![("the", "DET"), ("dog", "NOUN"), ("runs", "VERB")]];
    let test = vec![vec!["the", "dog", "runs"]];
    for smoothing in [Smoothing::constant(), Smoothing::rarity()].iter() {
        let model = estimate(&train, smoothing);
        let tagged = decode(&model, &test).unwrap();
        assert_eq!(
            tagged,
            vec![vec![
                ("the".to_string(), "DET".to_string()),
                ("dog".to_string(), "NOUN".to_string()),
                ("runs".to_string(), "VERB".to_string()),
            ]]
        );
    }
}

#[test]
fn preserves_length_and_words() {
    init_logger();
    let test = vec![
        vec!["the", "big", "dog", "sleeps", "."],
        vec!["Alice", "runs", "."],
        vec!["unknown", "words", "everywhere"],
        vec!["."],
    ];
    for smoothing in [Smoothing::constant(), Smoothing::rarity()].iter() {
        let model = estimate(&train(), smoothing);
        let tagged = decode(&model, &test).unwrap();
        assert_eq!(tagged.len(), test.len());
        for (sentence, output) in test.iter().zip(&tagged) {
            assert_eq!(sentence.len(), output.len());
            for (word, (w, tag)) in sentence.iter().zip(output) {
                assert_eq!(word, w);
                assert!(model.tags().to_id(tag).is_some(), "unknown tag {}", tag);
            }
        }
    }
}

#[test]
fn empty_sentences_stay_empty() {
    init_logger();
    let test: Vec<Vec<&str>> = vec![vec![], vec!["the", "dog"], vec![]];
    for smoothing in [Smoothing::constant(), Smoothing::rarity()].iter() {
        let model = estimate(&train(), smoothing);
        let tagged = decode(&model, &test).unwrap();
        assert!(tagged[0].is_empty());
        assert_eq!(tagged[1].len(), 2);
        assert!(tagged[2].is_empty());
    }
}

#[test]
fn empty_model_is_an_error() {
    init_logger();
    let train: Vec<Vec<(&str, &str)>> = vec![];
    let model = estimate(&train, &Smoothing::rarity());
    assert_eq!(model.num_tags(), 0);
    let empty: Vec<Vec<&str>> = vec![vec![]];
    let tagged = decode(&model, &empty).unwrap();
    assert_eq!(tagged.len(), 1);
    assert!(tagged[0].is_empty());
    match decode(&model, &[vec!["dog"]]) {
        Err(Error::EmptyModel) => {}
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn tags_known_sentences() {
    init_logger();
    let model = estimate(&train(), &Smoothing::constant());
    let tagged = decode(&model, &[vec!["a", "dog", "sleeps", "."]]).unwrap();
    let tags: Vec<_> = tagged[0].iter().map(|(_, t)| t.as_str()).collect();
    assert_eq!(tags, vec!["DET", "NOUN", "VERB", "PUNCT"]);
}

#[test]
fn context_resolves_ambiguous_words() {
    init_logger();
    let model = estimate(&train(), &Smoothing::rarity());
    let tagged = decode(&model, &[vec!["the", "run", "was", "long", "."], vec!["we", "run", "."]]).unwrap();
    assert_eq!(tagged[0][1].1, "NOUN");
    assert_eq!(tagged[1][1].1, "VERB");
}

#[test]
fn rarity_smoothing_tags_unseen_subject() {
    init_logger();
    // DET and PUNCT own no hapax word, so an unseen word can never take them.
    let model = estimate(&train(), &Smoothing::rarity());
    let tagged = decode(&model, &[vec!["Alice", "sees", "the", "cat", "."]]).unwrap();
    let tags: Vec<_> = tagged[0].iter().map(|(_, t)| t.as_str()).collect();
    assert_eq!(tags[1..], ["VERB", "DET", "NOUN", "PUNCT"]);
    assert!(tags[0] != "DET" && tags[0] != "PUNCT", "{:?}", tags);
}

#[test]
fn first_seen_tag_order_breaks_ties() {
    init_logger();
    let ab = vec![vec![("x", "A")], vec![("x", "B")]];
    let ba = vec![vec![("x", "B")], vec![("x", "A")]];
    let model = estimate(&ab, &Smoothing::constant());
    assert_eq!(model.tags().to_str(0), Some("A"));
    assert_eq!(decode(&model, &[vec!["x"]]).unwrap()[0][0].1, "B");
    let model = estimate(&ba, &Smoothing::constant());
    assert_eq!(model.tags().to_str(0), Some("B"));
    assert_eq!(decode(&model, &[vec!["x"]]).unwrap()[0][0].1, "A");
}

#[test]
fn decoding_is_deterministic() {
    init_logger();
    let test = vec![
        vec!["the", "old", "cat", "walks", "."],
        vec!["zzz", "yyy", "xxx"],
        vec!["Mary", "runs", "fast", "."],
    ];
    for smoothing in [Smoothing::constant(), Smoothing::rarity()].iter() {
        let first = decode(&estimate(&train(), smoothing), &test).unwrap();
        for _ in 0..5 {
            let again = decode(&estimate(&train(), smoothing), &test).unwrap();
            assert_eq!(first, again);
        }
    }
}

#[test]
fn tagger_matches_decode() {
    init_logger();
    let model = estimate(&train(), &Smoothing::rarity());
    let mut tagger = HmmTagger::new(&model);
    let sentence = vec!["they", "see", "a", "man", "."];
    let tagged = tagger.tag(sentence.as_slice()).unwrap();
    assert_eq!(vec![tagged], decode(&model, &[sentence.clone()]).unwrap());

    let mut labels = Vec::new();
    let score = tagger.viterbi(sentence.as_slice(), &mut labels).unwrap();
    assert_eq!(labels.len(), sentence.len());
    assert!(score.is_finite());
}

#[test]
fn log_units_still_tag_known_sentences() {
    init_logger();
    let config = TaggerConfig {
        smoothing: Smoothing::constant(),
        units: ScoreUnits::Log,
    };
    let model = config.estimate(&train());
    let tagged = decode(&model, &[vec!["the", "dog", "runs", "."]]).unwrap();
    let tags: Vec<_> = tagged[0].iter().map(|(_, t)| t.as_str()).collect();
    assert_eq!(tags, vec!["DET", "NOUN", "VERB", "PUNCT"]);
}

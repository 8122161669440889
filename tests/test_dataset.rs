use std::{convert::TryFrom, fs::File, io::Write, path::PathBuf};

use hmmtagger::{decode, Corpus, Evaluation, TaggerConfig};

const TRAIN: &str = "DET\tthe\nNOUN\tdog\nVERB\truns\nPUNCT\t.\n\n\
DET\ta\nNOUN\tcat\nVERB\tsleeps\nPUNCT\t.\n\n\
PROPN\tJohn\nVERB\truns\nPUNCT\t.\n";

const TEST: &str = "DET\tthe\nNOUN\tcat\nVERB\truns\nPUNCT\t.\n\n\
PROPN\tMary\nVERB\tsleeps\nPUNCT\t.\n\n";

fn write_temp(name: &str, content: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("hmmtagger-{}-{}", std::process::id(), name));
    let mut f = File::create(&path).expect("failed to create file");
    f.write_all(content.as_bytes()).expect("failed to write file");
    path
}

#[test]
fn read_train_and_evaluate() {
    let train_path = write_temp("train.tsv", TRAIN);
    let test_path = write_temp("test.tsv", TEST);

    let train = Corpus::try_from(File::open(&train_path).unwrap()).unwrap();
    let test = Corpus::try_from(File::open(&test_path).unwrap()).unwrap();
    assert_eq!(train.len(), 3);
    assert_eq!(train.total_words(), 11);
    assert_eq!(test.len(), 2);
    assert_eq!(test.max_length(), 4);

    let model = TaggerConfig::default().estimate(train.sentences());
    let prediction = decode(&model, &test.words()).unwrap();

    let mut evaluation = Evaluation::default();
    for (reference, predicted) in test.sentences().iter().zip(&prediction) {
        evaluation.accumulate_with(reference, predicted, &model);
    }
    let est = evaluation.evaluate();
    assert_eq!(prediction[0][1].1, "NOUN");
    assert_eq!(evaluation.items().n_total, 7);
    assert_eq!(evaluation.unseen().n_total, 1);
    assert!(est.accuracy >= 6.0 / 7.0, "{}", evaluation);

    let _ = std::fs::remove_file(train_path);
    let _ = std::fs::remove_file(test_path);
}

#[test]
fn write_tagged_output() {
    let test = Corpus::read(TEST.as_bytes()).unwrap();
    let mut buf = Vec::new();
    Corpus::write(&mut buf, test.sentences()).unwrap();
    assert_eq!(String::from_utf8(buf).unwrap(), TEST);
}

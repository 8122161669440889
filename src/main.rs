use std::{convert::TryFrom, fs::File, io, path::PathBuf, time::Instant};

use clap::{Parser, ValueEnum};
use hmmtagger::{Corpus, Evaluation, HmmTagger, Result, Smoothing, Tagger, TaggerConfig};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SmoothingArg {
    /// one smoothing constant for every tag
    Constant,
    /// smoothing weighted by the singleton words of each tag
    Rarity,
}

/// Train an HMM tagger on a tagged corpus (TRAIN) and tag the sentences of
/// another corpus (TEST). Corpora hold one `TAG<TAB>word` line per token and
/// a blank line between sentences; the tags of TEST are used only by -t.
#[derive(Debug, Parser)]
struct Argv {
    /// read training sentences from a file (TRAIN)
    #[arg(long, value_name = "TRAIN")]
    train: PathBuf,
    /// read sentences to tag from a file (TEST)
    #[arg(long, value_name = "TEST")]
    test: PathBuf,
    /// read tagger options from a JSON file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,
    /// override the smoothing strategy of the config
    #[arg(short, long, value_enum)]
    smoothing: Option<SmoothingArg>,
    /// report the performance of the model on the test data
    #[arg(short = 't', long = "test-mode")]
    evaluate: bool,
    /// suppress tagging results (useful for test mode)
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let argv = Argv::parse();
    log::info!("{:?}", argv);

    let mut config = match &argv.config {
        Some(path) => TaggerConfig::from_path(path)?,
        None => TaggerConfig::default(),
    };
    match argv.smoothing {
        Some(SmoothingArg::Constant) => config.smoothing = Smoothing::constant(),
        Some(SmoothingArg::Rarity) => config.smoothing = Smoothing::rarity(),
        None => {}
    }

    let train = Corpus::try_from(File::open(&argv.train)?)?;
    let test = Corpus::try_from(File::open(&argv.test)?)?;
    let model = config.estimate(train.sentences());

    let begin = Instant::now();
    let mut tagger = HmmTagger::new(&model);
    let mut evaluation = Evaluation::default();
    let mut output = Vec::with_capacity(test.len());
    for (reference, words) in test.sentences().iter().zip(test.words()) {
        let prediction = tagger.tag(words.as_slice())?;
        if argv.evaluate {
            evaluation.accumulate_with(reference, &prediction, tagger.model());
        }
        if !argv.quiet {
            output.push(prediction);
        }
    }
    let sec = begin.elapsed().as_secs_f64();
    log::info!(
        "tagged {} sentences in {:.3} sec ({:.1} sentences/sec)",
        test.len(),
        sec,
        test.len() as f64 / sec.max(f64::EPSILON)
    );

    if !argv.quiet {
        Corpus::write(io::stdout().lock(), &output)?;
    }
    if argv.evaluate {
        evaluation.evaluate();
        println!("{}", evaluation);
    }
    Ok(())
}

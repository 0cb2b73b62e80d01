use anyhow::Result;

use skift_classifiers::{
    Cell, FastTextModel, Frame, FtClassifier, Label, Targets, TrainOptions,
};

fn main() -> Result<()> {
    env_logger::init();

    // Two tiny classes; fastText needs a few epochs to separate them
    let df = Frame::from_labeled_rows(
        vec![Label::from("txt"), Label::from("lbl")],
        vec![
            vec![Cell::from("woof woof"), Cell::from(0)],
            vec![Cell::from("meow meow"), Cell::from(1)],
            vec![Cell::from("bark woof growl"), Cell::from(0)],
            vec![Cell::from("purr meow hiss"), Cell::from(1)],
        ],
    )?;
    let y = Targets::from_column(&df, &Label::from("lbl"))?;

    let options = TrainOptions::new()
        .with("epoch", 50)
        .with("lr", 1.0);
    let mut clf = FtClassifier::<FastTextModel>::col_lbl_based("txt", options);
    clf.fit(&df, y)?;
    println!("Fitted {:?}", clf);

    let test = Frame::from_labeled_rows(
        vec![Label::from("txt")],
        vec![vec!["woof lol"], vec!["meow lolz"]],
    )?;
    let preds = clf.predict(&test)?;
    let probas = clf.predict_proba(&test)?;
    for (i, label) in preds.iter().enumerate() {
        println!("row {}: {} (probabilities {:?})", i, label, probas.row(i).to_vec());
    }

    let path = std::env::temp_dir().join("woof_meow_clf.json");
    clf.save(&path)?;
    let restored = FtClassifier::<FastTextModel>::load(&path)?;
    println!("Restored predictions: {:?}", restored.predict(&test)?);
    std::fs::remove_file(&path)?;

    Ok(())
}

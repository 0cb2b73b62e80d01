//! Integration tests for the four input selectors and the fit/predict contract.

mod support;

use rstest::rstest;

use skift_classifiers::{
    Cell, ClassifierError, Column, Features, FtClassifier, Frame, InputSelector, Label, OptionValue,
    Targets, TrainOptions,
};
use support::{init_logging, pets_frame, pets_text, BagOfWordsModel};

type Clf = FtClassifier<BagOfWordsModel>;

fn lbl() -> Targets {
    Targets::from_column(&pets_frame(), &Label::from("lbl")).unwrap()
}

fn rows(text: &str) -> Features {
    Features::from(vec![vec![text]])
}

fn txt_frame(text: &str) -> Features {
    Features::from(Frame::new(vec![Column::new("txt", vec![Cell::from(text)])]).unwrap())
}

fn assert_pets(clf: &Clf, make: fn(&str) -> Features) {
    let cases = [
        ("woof woof", 0),
        ("meow meow", 1),
        ("meow", 1),
        ("woof lol", 0),
        ("meow lolz", 1),
    ];
    for (text, expected) in cases {
        assert_eq!(
            clf.predict(make(text)).unwrap(),
            vec![Label::Int(expected)],
            "prediction for {:?}",
            text
        );
    }
}

// ---------------------------------------------------------------------------
// shape validation
// ---------------------------------------------------------------------------

#[test]
fn bad_shape() {
    let mut clf = Clf::first_col(TrainOptions::new());
    let err = clf.fit(Features::from_flat(vec![7]), vec![0]).unwrap_err();
    assert!(matches!(err, ClassifierError::Shape(_)));
    let err = clf
        .fit(vec![vec![7]], Targets::from_rows(vec![vec![0]]))
        .unwrap_err();
    assert!(matches!(err, ClassifierError::Shape(_)));
}

#[test]
fn wrong_rank_fails_before_touching_scratch_dir() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.json");
    let mut clf = Clf::first_col(TrainOptions::new());
    assert!(clf
        .fit(vec![vec!["a"], vec!["b"]], Targets::from_rows(vec![vec![0], vec![1]]))
        .is_err());
    // nothing was fitted, so persisting writes no snapshot
    clf.save(&path).unwrap();
    let json = std::fs::read_to_string(&path).unwrap();
    assert!(json.contains(r#""model":null"#));
}

// ---------------------------------------------------------------------------
// predict / predict_proba
// ---------------------------------------------------------------------------

#[test]
fn predict() {
    init_logging();
    let mut clf = Clf::first_col(TrainOptions::new());
    clf.fit(pets_text(), lbl()).unwrap();
    assert_pets(&clf, rows);
}

#[test]
fn predict_is_repeatable() {
    let mut clf = Clf::first_col(TrainOptions::new());
    clf.fit(pets_text(), lbl()).unwrap();
    let first = clf.predict(rows("meow woof meow")).unwrap();
    for _ in 0..5 {
        assert_eq!(clf.predict(rows("meow woof meow")).unwrap(), first);
    }
}

#[test]
fn predict_proba() {
    let mut clf = Clf::first_col(TrainOptions::new());
    clf.fit(pets_text(), lbl()).unwrap();

    let res = clf.predict_proba(rows("woof woof")).unwrap();
    assert!(res[[0, 0]] > res[[0, 1]]);
    let res = clf.predict_proba(rows("meow meow")).unwrap();
    assert!(res[[0, 1]] > res[[0, 0]]);
}

#[test]
fn predict_proba_rows_are_distributions_in_fit_order() {
    let mut clf = Clf::first_col(TrainOptions::new());
    let x = vec![vec!["tweet"], vec!["meow"], vec!["woof"], vec!["meow purr"]];
    clf.fit(x, vec!["bird", "cat", "dog", "cat"]).unwrap();
    assert_eq!(
        clf.classes().unwrap(),
        &[Label::from("bird"), Label::from("cat"), Label::from("dog")]
    );

    let probas = clf
        .predict_proba(vec![vec!["woof"], vec!["purr"], vec!["tweet tweet"]])
        .unwrap();
    assert_eq!(probas.shape(), &[3, 3]);
    for row in probas.rows() {
        assert!(row.iter().all(|p| (0.0..=1.0).contains(p)));
        assert!((row.sum() - 1.0).abs() < 1e-4);
    }
    assert!(probas[[0, 2]] > probas[[0, 0]] && probas[[0, 2]] > probas[[0, 1]]);
    assert!(probas[[1, 1]] > probas[[1, 2]]);
    assert!(probas[[2, 0]] > probas[[2, 1]]);
}

#[test]
fn predict_texts_and_proba_texts() {
    let mut clf = Clf::first_col(TrainOptions::new());
    clf.fit_texts(&["woof woof", "meow meow"], vec![0, 1]).unwrap();
    assert_eq!(
        clf.predict_texts(&["meow", "woof"]).unwrap(),
        vec![Label::Int(1), Label::Int(0)]
    );
    let probas = clf.predict_proba_texts(&["meow"]).unwrap();
    assert!(probas[[0, 1]] > probas[[0, 0]]);
}

#[test]
fn string_labels_keep_their_type() {
    let mut clf = Clf::first_col(TrainOptions::new());
    clf.fit(vec![vec!["woof woof"], vec!["meow meow"]], vec!["0", "1"])
        .unwrap();
    assert_eq!(clf.predict(rows("meow")).unwrap(), vec![Label::from("1")]);
}

// ---------------------------------------------------------------------------
// selectors
// ---------------------------------------------------------------------------

#[test]
fn idx_based() {
    let mut clf = Clf::idx_based(0, TrainOptions::new());
    clf.fit(pets_text(), lbl()).unwrap();
    assert_pets(&clf, rows);
}

#[test]
fn idx_based_picks_later_column() {
    let mut clf = Clf::idx_based(1, TrainOptions::new());
    clf.fit(
        vec![vec!["x", "woof woof"], vec!["x", "meow meow"]],
        vec![0, 1],
    )
    .unwrap();
    assert_eq!(clf.predict(vec![vec!["x", "meow"]]).unwrap(), vec![Label::Int(1)]);
    assert!(matches!(
        clf.predict(rows("meow")),
        Err(ClassifierError::ColumnIndex { index: 1, ncols: 1 })
    ));
}

#[test]
fn first_obj() {
    let mut clf = Clf::first_obj(TrainOptions::new());
    clf.fit(pets_text(), lbl()).unwrap();
    let from_frame = |text: &str| Features::from(Frame::from_rows(vec![vec![text]]).unwrap());
    assert_pets(&clf, from_frame);

    let numeric = Features::from(Frame::from_rows(vec![vec![5]]).unwrap());
    assert!(matches!(
        clf.predict(numeric),
        Err(ClassifierError::NoObjectColumn)
    ));
}

#[test]
fn first_obj_skips_numeric_columns() {
    let mut clf = Clf::first_obj(TrainOptions::new());
    clf.fit(pets_frame(), lbl()).unwrap();
    let x = Frame::new(vec![
        Column::new("n", vec![Cell::Int(1)]),
        Column::new("txt", vec![Cell::from("meow")]),
    ])
    .unwrap();
    assert_eq!(clf.predict(x).unwrap(), vec![Label::Int(1)]);
}

#[test]
fn col_lbl() {
    let mut clf = Clf::col_lbl_based("txt", TrainOptions::new());
    clf.fit(pets_text(), lbl()).unwrap();
    assert_pets(&clf, txt_frame);

    let other = Features::from(Frame::new(vec![Column::new("body", vec![Cell::from("meow")])]).unwrap());
    assert!(matches!(
        clf.predict(other),
        Err(ClassifierError::MissingColumn(_))
    ));
}

// ---------------------------------------------------------------------------
// lifecycle and parameters
// ---------------------------------------------------------------------------

#[rstest]
#[case(InputSelector::FirstColumn)]
#[case(InputSelector::ByIndex { input_ix: 0 })]
#[case(InputSelector::ByLabel { input_col_lbl: Label::from("txt") })]
#[case(InputSelector::FirstObjectColumn)]
fn unfitted_adapters_refuse_to_predict(#[case] selector: InputSelector) {
    let clf = Clf::new(selector, TrainOptions::new());
    assert!(matches!(
        clf.predict(txt_frame("woof")),
        Err(ClassifierError::NotFitted { .. })
    ));
    assert!(matches!(
        clf.predict_proba(txt_frame("woof")),
        Err(ClassifierError::NotFitted { .. })
    ));
    assert!(matches!(clf.is_quantized(), Err(ClassifierError::NotFitted { .. })));
}

#[rstest]
#[case(Clf::idx_based(3, TrainOptions::new().with("epoch", 10)), "input_ix", OptionValue::Int(3))]
#[case(Clf::col_lbl_based("txt", TrainOptions::new().with("epoch", 10)), "input_col_lbl", OptionValue::from("txt"))]
fn selector_parameter_is_in_params(#[case] clf: Clf, #[case] key: &str, #[case] expected: OptionValue) {
    let params = clf.get_params(true);
    assert_eq!(params.get(key), Some(&expected));
    assert_eq!(params.get("epoch"), Some(&OptionValue::Int(10)));
    assert_eq!(params.len(), 2);
}

#[test]
fn unknown_option_is_reported_at_fit() {
    let mut clf = Clf::first_col(TrainOptions::new().with("notAnOption", true));
    let err = clf.fit(pets_text(), lbl()).unwrap_err();
    assert!(matches!(err, ClassifierError::Engine(_)));
    assert!(err.to_string().contains("notAnOption"));
}

#[test]
fn input_option_is_reserved() {
    let clf = Clf::first_col(TrainOptions::new().with("input", "/etc/passwd").with("lr", 0.3));
    let params = clf.get_params(true);
    assert!(!params.contains_key("input"));
    assert_eq!(params.get("lr"), Some(&OptionValue::Float(0.3)));
}

#[test]
fn refit_replaces_label_set() {
    let mut clf = Clf::first_col(TrainOptions::new());
    clf.fit(pets_text(), lbl()).unwrap();
    assert_eq!(clf.num_classes(), 2);
    clf.fit(vec![vec!["a"], vec!["b"], vec!["c"]], vec![7, 8, 9])
        .unwrap();
    assert_eq!(clf.num_classes(), 3);
    assert_eq!(clf.predict(rows("b")).unwrap(), vec![Label::Int(8)]);
}

#[test]
fn labels_that_cannot_round_trip_are_rejected() {
    let mut clf = Clf::first_col(TrainOptions::new());
    let err = clf
        .fit(vec![vec!["woof woof"], vec!["meow meow"]], vec!["good dog", "cat"])
        .unwrap_err();
    assert!(matches!(err, ClassifierError::InvalidLabel(_)));

    let y = Targets::from_column(
        &Frame::from_rows(vec![vec![Cell::Int(1)], vec![Cell::from("1")], vec![Cell::Int(2)]]).unwrap(),
        &Label::Int(0),
    )
    .unwrap();
    let err = clf
        .fit(vec![vec!["woof"], vec!["meow"], vec!["tweet"]], y)
        .unwrap_err();
    assert!(matches!(err, ClassifierError::InvalidLabel(_)));
    assert!(!clf.is_fitted());
}

#[test]
fn fit_with_validation_set() {
    let mut clf = Clf::first_col(TrainOptions::new());
    clf.fit_with_validation(pets_text(), lbl(), pets_text(), lbl())
        .unwrap();
    assert_pets(&clf, rows);
}

#[test]
fn quantize_after_fit() {
    let mut clf = Clf::first_col(TrainOptions::new());
    clf.fit(pets_text(), lbl()).unwrap();
    clf.quantize(&TrainOptions::new()).unwrap();
    assert!(clf.is_quantized().unwrap());
    assert_pets(&clf, rows);
}

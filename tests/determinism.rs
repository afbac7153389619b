use tasmee::{compare_full, normalize, suggest, Recitation, TasmeeConfig};

const SPOKEN: &str = "قل هو اللة احد الله الصمد لم يولد ولم يكن كفوا احد";
const REFERENCE: &str = "قُلْ هُوَ ٱللَّهُ أَحَدٌ (1) ٱللَّهُ ٱلصَّمَدُ (2) لَمْ يَلِدْ وَلَمْ يُولَدْ (3) وَلَمْ يَكُن لَّهُ كُفُوًا أَحَدٌ (4)";

#[test]
fn repeated_comparisons_are_identical() {
    let first = compare_full(SPOKEN, REFERENCE);
    for _ in 0..10 {
        assert_eq!(compare_full(SPOKEN, REFERENCE), first);
    }
    assert!(!first.discrepancies.is_empty());
}

#[test]
fn independently_built_checkers_agree() {
    let a = Recitation::new(&TasmeeConfig::default()).expect("valid config");
    let b = Recitation::default();
    assert_eq!(
        a.compare_full(SPOKEN, REFERENCE),
        b.compare_full(SPOKEN, REFERENCE)
    );
}

#[test]
fn equivalent_spellings_share_a_digest() {
    let plain = normalize("قل هو الله احد");
    let marked = normalize("قُلْ هُوَ ٱللَّهُ أَحَدٌ ۝");
    assert_eq!(plain.text, marked.text);
    assert_eq!(plain.digest, marked.digest);
    assert_ne!(plain.digest, normalize("قل هو الله").digest);
}

#[test]
fn suggestions_depend_only_on_discrepancies() {
    let result = compare_full(SPOKEN, REFERENCE);
    let again = compare_full(SPOKEN, REFERENCE);
    assert_eq!(suggest(&result.discrepancies), suggest(&again.discrepancies));
}

#[test]
fn comparison_serializes_stably() {
    let result = compare_full(SPOKEN, REFERENCE);
    let a = serde_json::to_string(&result).expect("serialize");
    let b = serde_json::to_string(&compare_full(SPOKEN, REFERENCE)).expect("serialize");
    assert_eq!(a, b);
    assert!(a.contains("\"type\":\"missing\""));
}

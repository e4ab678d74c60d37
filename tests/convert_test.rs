//! End-to-end conversion tests.

use letterform::{
    check_placeholders, convert, convert_text, ConvertOptions, DocumentType, Letterform,
};

#[test]
fn test_loan_table_scenario() {
    let text = "Loan Number: {[M594]}\nProperty Address: {[M567]}, {[M583]}, {[M568]}";
    let html = convert_text(text).unwrap();

    assert!(html.contains("<table"));
    assert!(html.contains("width: 20%"));
    assert!(html.contains("<b>Loan Number:</b>"));
    assert!(html.contains("{[M594]}"));
    assert!(html.contains("{Compress({[M567]}|{[M583]}|{[M568]})}"));
    // Two rows, one table.
    assert_eq!(html.matches("<tr>").count(), 2);
    assert_eq!(html.matches("<table").count(), 1);
}

#[test]
fn test_payment_schedule_scenario() {
    let text = "Trial Period Plan\n\n\
                1st payment: {Money({[T045]})} by {[T048]}\n\
                2nd payment: {Money({[T046]})} by {[T049]}\n\
                3rd payment: {Money({[T047]})} by {[T050]}";
    let result = convert(text, &ConvertOptions::default()).unwrap();

    assert_eq!(result.metadata.doc_type, DocumentType::Lm060);
    let html = &result.html;
    assert!(html.contains("<u>Trial Period Plan</u>"));
    assert!(html.contains("border: 1px solid rgba(0, 0, 0, 1)"));
    assert!(html.contains("<div>1st payment: {Money({[T045]})} by {[T048]}</div>"));
    assert!(html.contains("<div>2nd payment:"));
    assert!(html.contains("<div>3rd payment:"));
}

#[test]
fn test_placeholder_preservation() {
    let text = "{[tagHeader]}\n\n\
                Loan Number: {[M594]}\nProperty Address: {[M567]}, {[M568]}\n\n\
                Dear {[Salutation]},\n\n\
                You owe ${[M591E6]} as of {[U027]}.\n\n\
                Call {[CSPhoneNumber]} during {[LossMitHrs]}.";
    let html = convert_text(text).unwrap();

    for token in [
        "{[tagHeader]}",
        "{[M594]}",
        "{[Salutation]}",
        "{Money({[M591]})}",
        "{[U027]}",
        "{[plsMatrix.CSPhoneNumber]}",
        "{[plsMatrix.LossMitHrs]}",
    ] {
        assert_eq!(html.matches(token).count(), 1, "token {} missing", token);
    }
    // Canonicalized tokens must survive assembly exactly once.
    let canonical = "{[tagHeader]} {[M594]} {Compress({[M567]}|{[M568]})} \
                     Dear {[Salutation]}, {Money({[M591]})} {[U027]} \
                     {[plsMatrix.CSPhoneNumber]} {[plsMatrix.LossMitHrs]}";
    check_placeholders(canonical, &html).unwrap();
}

#[test]
fn test_duplicate_salutation_removal() {
    let text = "Dear {[Salutation]},\n\n\
                First paragraph of the letter.\n\n\
                Dear {[M558]} and {[M559]}:\n\n\
                Second paragraph.\n\n\
                Dear valued customer,\n\n\
                Closing paragraph.";
    let html = convert_text(text).unwrap();

    assert_eq!(html.matches("Dear {[Salutation]},").count(), 1);
    assert_eq!(html.matches("Dear ").count(), 1);
}

#[test]
fn test_variant_salutation_before_canonical() {
    let text = "Dear valued customer,\n\n\
                Dear {[Salutation]},\n\n\
                Body paragraph of the letter.";
    let html = convert_text(text).unwrap();

    assert_eq!(html.matches("Dear ").count(), 1);
    assert!(html.contains("Dear {[Salutation]},"));
}

#[test]
fn test_content_parenthetical_survives_conversion() {
    let text = "You owe {[M591]} (State law may provide you additional rights).";
    let html = convert_text(text).unwrap();
    assert!(html.contains("(State law may provide you additional rights)"));
}

#[test]
fn test_prose_between_loan_and_property_stays_prose() {
    let text = "Loan Number: {[M594]}\n\n\
                Please read this letter carefully before responding.\n\n\
                Property Address: {[M567]}, {[M568]}";
    let html = convert_text(text).unwrap();

    assert!(html.contains("<div>Please read this letter carefully before responding.</div>"));
    assert!(!html.contains("<td style=\"border: 1px solid rgba(0, 0, 0, 1); padding: 2px;\">\
                            Please read this letter carefully before responding.</td>"));
}

#[test]
fn test_bold_emphasis_idempotent() {
    let text = "Time is of the essence.\n\nPlease remit payment today.";
    let first = convert_text(text).unwrap();
    assert!(first.contains("<b>Time is of the essence.</b>"));
    assert!(!first.contains("<b><b>"));
    // Re-applying the pass on its own output must change nothing.
    assert_eq!(letterform::render::insert_bold_emphasis(&first), first);
}

#[test]
fn test_script_injection_escaped() {
    let text = "Totally normal letter <script>alert('x')</script> content.\n\n\
                <img src=x onerror=alert(1)> and {[M594]} stays.";
    let html = convert_text(text).unwrap();

    assert!(!html.contains("<script>"));
    assert!(!html.contains("<img"));
    assert!(html.contains("&lt;script&gt;"));
    assert!(html.contains("{[M594]}"));
}

#[test]
fn test_sd002_classification_end_to_end() {
    let text = "Notice of Breach\n\n\
                You are in default under the Note and Mortgage held on your property.\n\n\
                This is an attempt to collect a debt and any information obtained will be used for that purpose.";
    let result = convert(text, &ConvertOptions::default()).unwrap();

    assert_eq!(result.metadata.doc_type, DocumentType::Sd002);
    assert!(result.html.contains("text-align: center;"));
    assert!(result
        .html
        .contains("<b><i>This is an attempt to collect a debt"));
}

#[test]
fn test_payment_label_consolidation_end_to_end() {
    let text = "Number of Payments Due: {[M555]}\n\n\
                Net Payment Amount: ${[M591E6]}\n\n\
                Unpaid Late Charges: ${[M592E6]}\n\n\
                Please remit payment promptly.";
    let html = convert_text(text).unwrap();

    assert!(html.contains("width: 50%"));
    assert!(html.contains("<b>Number of Payments Due:</b>"));
    assert!(html.contains("Total Due: {Math({[C001]} + {[M585]} - {[M013]}|Money)}"));
}

#[test]
fn test_conditional_section_end_to_end() {
    let text = "{If('{[M956]}' = '1')}\n\
                {[M957]} {[M958]}\n\
                {End If}";
    let html = convert_text(text).unwrap();

    assert!(html.contains("{If('{[M956]}' = '1')}"));
    assert!(html.contains("{End If}"));
    assert!(html.contains("{[M957]}"));
}

#[test]
fn test_mid_sentence_break_repaired() {
    let text = "You are required to\n\npay the amount due immediately.";
    let html = convert_text(text).unwrap();
    assert!(html.contains("<div>You are required to pay the amount due immediately.</div>"));
}

#[test]
fn test_builder_doc_type_override() {
    let result = Letterform::new()
        .doc_type(DocumentType::Ct102)
        .convert("{[tagHeader]}\n\nBody text.")
        .unwrap();
    assert_eq!(result.metadata.doc_type, DocumentType::Ct102);
    assert!(result.html.contains("{Insert(H003 TagHeader)}"));
}

#[test]
fn test_batch_conversion() {
    let texts = vec![
        "First letter body.".to_string(),
        "".to_string(),
        "Third letter body.".to_string(),
    ];
    let results = letterform::convert_batch(&texts, &ConvertOptions::default());
    assert_eq!(results.len(), 3);
    assert!(results[0].is_ok());
    assert!(results[1].is_err());
    assert!(results[2].is_ok());
}

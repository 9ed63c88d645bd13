use super::*;

#[test]
fn test_every_code_is_documented() {
    for code in ErrorCode::ALL {
        assert!(ErrorDocs::has_docs(*code), "{code} has no documentation");
    }
    assert_eq!(ErrorDocs::all_codes().count(), ErrorCode::ALL.len());
}

#[test]
fn test_doc_heading_matches_code() {
    for code in ErrorCode::ALL {
        let doc = ErrorDocs::get(*code).unwrap_or_default();
        assert!(
            doc.starts_with(&format!("# {code}:")),
            "{code} doc should open with its heading"
        );
    }
}

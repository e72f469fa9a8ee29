#![no_main]
use libfuzzer_sys::fuzz_target;
use tagdoc::{compare_docs, DocBuilder, Document};

fuzz_target!(|data: &[u8]| {
    if let Ok(doc) = Document::from_bytes(Vec::from(data)) {
        let mut b = DocBuilder::new();
        b.append_elements(doc.as_doc_ref()).unwrap();
        let copy = b.done();
        assert_eq!(copy.as_bytes(), doc.as_bytes());
        let _ = compare_docs(doc.as_doc_ref(), copy.as_doc_ref());
        let _ = doc.to_string();
    }
});

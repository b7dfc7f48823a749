use sha2::{Digest, Sha256};

use vtgen::emit::{emit_invocation_line, emit_viewtuple_source, EmitOptions, Mode};

fn sha256_hex(s: &str) -> String {
    let mut h = Sha256::new();
    h.update(s.as_bytes());
    let out = h.finalize();
    out.iter().map(|b| format!("{b:02x}")).collect()
}

fn source(mode: Mode, max_elements: usize) -> String {
    emit_viewtuple_source(&EmitOptions { mode, max_elements }).expect("emit must succeed")
}

#[test]
fn ascending_three_elements_exact_text() {
    assert_eq!(
        source(Mode::Ascending, 3),
        "impl_view_tuple!(1; V0; 0);\n\
         impl_view_tuple!(2; V0, V1; 0, 1);\n\
         impl_view_tuple!(3; V0, V1, V2; 0, 1, 2);\n"
    );
}

#[test]
fn bidirectional_three_elements_exact_text() {
    assert_eq!(
        source(Mode::Bidirectional, 3),
        "pub const VIEW_TUPLE_MAX_ELEMENTS: usize = 3;\n\
         impl_view_tuple!(1; V0; 0; 0);\n\
         impl_view_tuple!(2; V0, V1; 0, 1; 1, 0);\n\
         impl_view_tuple!(3; V0, V1, V2; 0, 1, 2; 2, 1, 0);\n"
    );
}

#[test]
fn arity_one_reverse_order_degenerates_to_the_trailing_zero() {
    assert_eq!(
        emit_invocation_line(1, Mode::Ascending),
        "impl_view_tuple!(1; V0; 0);"
    );
    assert_eq!(
        emit_invocation_line(1, Mode::Bidirectional),
        "impl_view_tuple!(1; V0; 0; 0);"
    );
}

#[test]
fn golden_sha256_ascending_default_bound() {
    assert_eq!(
        sha256_hex(&source(Mode::Ascending, 128)),
        "b76220162909512cc75b260d1154616f37db129b6d64e07f8d2975d7744cbb1b"
    );
}

#[test]
fn golden_sha256_bidirectional_default_bound() {
    assert_eq!(
        sha256_hex(&source(Mode::Bidirectional, 128)),
        "5919337a66982e99a533c8d1854fdb967a3c3b6b28ef09c7680f547b4e58774c"
    );
}

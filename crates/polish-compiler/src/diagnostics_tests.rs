use crate::compiler::compile;

#[test]
fn renders_against_source() {
    let source = "1 2 foo end";
    let err = compile(source).unwrap_err();

    let out = err.printer().source(source).path("sum.pol").render();

    assert!(out.contains("error: Unknown instruction; `foo`"), "{out}");
    assert!(out.contains("sum.pol:1:5"), "{out}");
    assert!(out.contains("^^^"), "{out}");
}

#[test]
fn points_at_second_line() {
    let source = "1 2 add\n:x :x end\n";
    let err = compile(source).unwrap_err();

    let out = err.printer().source(source).render();

    assert!(out.contains("Label redefinition; `x` already at 18"), "{out}");
    assert!(out.contains(":x :x end"), "{out}");
}

#[test]
fn missing_end_points_past_source() {
    let source = "1 2 add";
    let err = compile(source).unwrap_err();

    let out = err.printer().source(source).render();

    assert!(out.contains("Program leaves valid memory before END"), "{out}");
}

#[test]
fn plain_without_source() {
    let err = compile("@gone end").unwrap_err();

    assert_eq!(err.printer().render(), "No label matching; `gone`");
}

#[test]
fn colored_output_has_escapes() {
    let source = "bad end";
    let err = compile(source).unwrap_err();

    let out = err.printer().source(source).colored(true).render();

    assert!(out.contains('\x1b'));
}

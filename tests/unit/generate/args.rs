use super::*;

#[test]
fn display_prefixes_every_token_with_a_space() {
    let mut b = ArgsBuilder::new();
    b.plain("-y").opt("-r", "30/1").opt_quoted("-i", 0);
    let p = b.finish();
    assert_eq!(p.to_string(), " -y -r 30/1 -i \"0\"");
    assert_eq!(p.len(), 5);
}

#[test]
fn argv_strips_shell_quoting() {
    let mut b = ArgsBuilder::new();
    b.opt_quoted("-map", "[out0]").plain("-");
    assert_eq!(b.finish().argv(), vec!["-map", "[out0]", "-"]);
}

#[test]
fn empty_pipeline_renders_empty() {
    let p = ArgsBuilder::new().finish();
    assert!(p.is_empty());
    assert_eq!(p.to_string(), "");
}

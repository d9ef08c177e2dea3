use hashlist::output::HumanOutput;

#[test]
fn human_output_includes_sections() {
    let mut human = HumanOutput::new("hashlist add: added task 2");
    human.push_summary("fragment", "?s=0&0=a");
    human.push_detail("[ ] 0: a");
    human.push_warning("fragment was empty");
    human.push_next_step("hashlist show <fragment>");

    let rendered = human.to_string();
    assert!(rendered.contains("hashlist add: added task 2"));
    assert!(rendered.contains("Summary:"));
    assert!(rendered.contains("- fragment: ?s=0&0=a"));
    assert!(rendered.contains("Details:"));
    assert!(rendered.contains("- [ ] 0: a"));
    assert!(rendered.contains("Warnings:"));
    assert!(rendered.contains("- fragment was empty"));
    assert!(rendered.contains("Next steps:"));
    assert!(rendered.contains("- hashlist show <fragment>"));
}

#[test]
fn human_output_omits_empty_sections() {
    let human = HumanOutput::new("hashlist clear: list emptied");
    let rendered = human.to_string();
    assert_eq!(rendered, "hashlist clear: list emptied");
}

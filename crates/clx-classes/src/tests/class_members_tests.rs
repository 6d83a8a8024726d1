use super::*;
use crate::finishers::ClassMethodMarker;
use crate::profile::{ProfileTable, SyntaxOptions, resolve};
use clx_parser::BaseClassMemberParser;

/// Position a parser on the first token of `member` and classify it.
fn classify_member(profile: &str, member: &str) -> MemberStart {
    let resolved = resolve(&ProfileTable::builtin(), &SyntaxOptions::with_profile(profile))
        .unwrap()
        .into_shared();
    let dispatcher = ClassesMemberParser::new(
        resolved,
        Arc::new(BaseClassMemberParser),
        Arc::new(ClassMethodMarker),
    );
    let mut parser = ParserState::new("test.js".to_string(), member.to_string());
    parser.next_token();
    let start = parser.token_pos();
    let result = dispatcher.classify(&mut parser);
    assert_eq!(parser.token_pos(), start, "classify must not consume");
    result
}

#[test]
fn test_classify_default_profile() {
    assert_eq!(classify_member("default", "var x;"), MemberStart::InstanceVariable);
    assert_eq!(classify_member("default", "var x = 1, y;"), MemberStart::InstanceVariable);
    assert_eq!(classify_member("default", "hidden foo() {}"), MemberStart::HiddenMethod);
    assert_eq!(classify_member("default", "hidden static foo() {}"), MemberStart::HiddenMethod);
    assert_eq!(classify_member("default", "foo() {}"), MemberStart::Base);
}

#[test]
fn test_keyword_followed_by_paren_is_a_method_name() {
    for (profile, keyword) in [
        ("default", "var"),
        ("default", "hidden"),
        ("minimal", "var"),
        ("my", "my"),
        ("internal", "internal"),
    ] {
        let source = format!("{keyword}() {{}}");
        assert_eq!(classify_member(profile, &source), MemberStart::Base, "{profile}");
    }
}

#[test]
fn test_string_key_is_never_a_keyword() {
    assert_eq!(classify_member("default", "'var' = 1;"), MemberStart::Base);
    assert_eq!(classify_member("default", "\"hidden\"() {}"), MemberStart::Base);
}

#[test]
fn test_other_profile_keywords_are_plain_names() {
    assert_eq!(classify_member("default", "my x;"), MemberStart::Base);
    assert_eq!(classify_member("my", "var x;"), MemberStart::Base);
    assert_eq!(classify_member("internal", "hidden foo() {}"), MemberStart::Base);
}

#[test]
fn test_shared_keyword_disambiguation() {
    assert_eq!(classify_member("my", "my x;"), MemberStart::InstanceVariable);
    assert_eq!(classify_member("my", "my x = 1, y;"), MemberStart::InstanceVariable);
    assert_eq!(classify_member("my", "my x }"), MemberStart::InstanceVariable);
    assert_eq!(classify_member("my", "my foo() {}"), MemberStart::HiddenMethod);
    assert_eq!(classify_member("my", "my *gen() {}"), MemberStart::HiddenMethod);
    assert_eq!(classify_member("my", "my [k]() {}"), MemberStart::HiddenMethod);
    assert_eq!(classify_member("my", "my 'k'() {}"), MemberStart::HiddenMethod);
    assert_eq!(classify_member("my", "my static foo() {}"), MemberStart::HiddenMethod);
    assert_eq!(classify_member("my", "my get x() {}"), MemberStart::HiddenMethod);
    assert_eq!(classify_member("internal", "internal async run() {}"), MemberStart::HiddenMethod);
    assert_eq!(classify_member("internal", "internal get;"), MemberStart::InstanceVariable);
}

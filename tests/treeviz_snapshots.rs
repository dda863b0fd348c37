//! Treeviz snapshots of parsed MFM.

use mfm::mfm::formats::{to_treeviz_str, to_treeviz_str_with};
use mfm::mfm::parsing::option::ParseOption;
use mfm::mfm::parsing::parse_text;

fn treeviz(input: &str) -> String {
    to_treeviz_str(&parse_text(input, ParseOption::default()))
}

#[test]
fn test_bold_between_text() {
    insta::assert_snapshot!(treeviz("aaa**hoge**bbb"), @r###"
    ├─ ◦ "aaa"
    ├─ 𝐁 Bold
    │ └─ ◦ "hoge"
    └─ ◦ "bbb"
    "###);
}

#[test]
fn test_center_with_function() {
    insta::assert_snapshot!(treeviz("<center>$[x2 **big** :ai:]</center>\n>quote\n"), @r###"
    ├─ ≡ Center
    │ └─ $ Function x2
    │   ├─ 𝐁 Bold
    │   │ └─ ◦ "big"
    │   ├─ ◦ " "
    │   └─ ☺ :ai:
    ├─ ◦ "\n"
    └─ ❝ Quote L1
      └─ ◦ "quote\n"
    "###);
}

#[test]
fn test_leaves() {
    insta::assert_snapshot!(treeviz("@ai https://misskey.io `code`"), @r###"
    ├─ @ @ai
    ├─ ◦ " "
    ├─ ⇗ https://misskey.io
    ├─ ◦ " "
    └─ ƒ InlineCode
      └─ ◦ "code"
    "###);
}

#[test]
fn test_truncated_text() {
    let nodes = parse_text("<small>a long piece of small text</small>", ParseOption::default());
    insta::assert_snapshot!(to_treeviz_str_with(&nodes, 6), @r###"
    └─ ˢ Small
      └─ ◦ "a long..."
    "###);
}

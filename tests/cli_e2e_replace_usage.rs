//! End-to-end tests for the `replace-usage` command

mod common;

use common::prelude::*;

#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_replace_usage_updates_members() {
    let fixture = TestFixture::new()
        .with_file("mapgrouppos.xml", xml::GROUP_POSITIONS)
        .with_file("mapgroupproto.xml", xml::GROUP_PROTO);

    fixture
        .command()
        .args(["replace-usage", "--usage", "Industrial", "--no-backup"])
        .args(["--pos-file", "mapgrouppos.xml", "--target-file", "mapgroupproto.xml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Number of updated groups: 1"))
        .stdout(predicate::str::contains("Number of groups without <usage>: 1"));

    assert_eq!(
        fixture.read("mapgroupproto.xml"),
        xml::GROUP_PROTO.replace("name=\"Farm\"", "name=\"Industrial\"")
    );
}

#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_replace_usage_malformed_target() {
    let fixture = TestFixture::new()
        .with_file("mapgrouppos.xml", xml::GROUP_POSITIONS)
        .with_file("mapgroupproto.xml", "<prototype><group name=\"x\">");

    fixture
        .command()
        .args(["replace-usage", "--usage", "Industrial"])
        .args(["--pos-file", "mapgrouppos.xml", "--target-file", "mapgroupproto.xml"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Malformed XML document"));

    assert_eq!(fixture.file_names().len(), 2);
}

#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_replace_usage_requires_usage() {
    let fixture = TestFixture::new();

    fixture
        .command()
        .args(["replace-usage", "--pos-file", "a.xml", "--target-file", "b.xml"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--usage"));
}

//! Integration tests for host -> authorized keys resolution on disk state.

mod common;

use common::*;
use keyserver::error::AccessError;

#[test]
fn test_example_deployment() {
    let fixture = Fixture::example();
    let resolver = fixture.resolver();

    let keys = resolver.resolve("web1", Some("tok-a")).unwrap();
    assert_eq!(keys.users, vec!["alice", "bob"]);
    assert_eq!(keys.key_count, 2);
    assert_eq!(keys.as_str(), format!("{}{}", line(ALICE_KEY), line(BOB_KEY)));
}

#[test]
fn test_wrong_or_missing_token() {
    let fixture = Fixture::example();
    let resolver = fixture.resolver();

    assert_eq!(resolver.resolve("web1", Some("wrong")), Err(AccessError::Unauthorized));
    assert_eq!(resolver.resolve("web1", Some("tok-d")), Err(AccessError::Unauthorized));
    assert_eq!(resolver.resolve("web1", None), Err(AccessError::Unauthorized));
}

#[test]
fn test_unknown_host_reported_before_token() {
    let fixture = Fixture::example();
    let resolver = fixture.resolver();

    assert_eq!(resolver.resolve("web2", Some("tok-a")), Err(AccessError::HostNotFound));
    assert_eq!(resolver.resolve("web2", None), Err(AccessError::HostNotFound));
}

#[test]
fn test_unknown_group_and_keyless_users_skipped() {
    let fixture = Fixture::example();
    fixture.add_key("carol", "work.pub", CAROL_KEY);
    let resolver = fixture.resolver();

    // db1: carol directly, then ops (bob, alice), then a group that does not exist.
    let keys = resolver.resolve("db1", Some("tok-d")).unwrap();
    assert_eq!(keys.users, vec!["carol", "bob", "alice"]);
    assert_eq!(
        keys.as_str(),
        format!("{}{}{}", line(CAROL_KEY), line(BOB_KEY), line(ALICE_KEY))
    );
}

#[test]
fn test_duplicate_user_served_once() {
    let fixture = Fixture::example();
    fixture.add_key("alice", "second.pub", DAVE_KEY);
    let resolver = fixture.resolver();

    // alice is both a direct user and an ops member.
    let keys = resolver.resolve("web1", Some("tok-a")).unwrap();
    assert_eq!(keys.key_count, 3);
    assert_eq!(keys.as_str().matches(ALICE_KEY).count(), 1);
}

#[test]
fn test_removing_all_keys_yields_no_authorized_users() {
    let fixture = Fixture::example();
    let resolver = fixture.resolver();

    fixture.remove_key("alice", "laptop.pub");
    fixture.remove_key("bob", "desktop.pub");
    resolver.keyring().reload().unwrap();

    assert_eq!(
        resolver.resolve("web1", Some("tok-a")),
        Err(AccessError::NoAuthorizedUsers)
    );
}

#[test]
fn test_host_with_no_users() {
    let fixture = Fixture::example();
    fixture.write_config("hosts:\n  lonely:\n    token: t\n");
    let resolver = fixture.resolver();

    assert_eq!(
        resolver.resolve("lonely", Some("t")),
        Err(AccessError::NoAuthorizedUsers)
    );
}

#[test]
fn test_hostname_with_slash() {
    let fixture = Fixture::example();
    fixture.write_config("hosts:\n  rack/web1:\n    token: t\n    users: [bob]\n");
    let resolver = fixture.resolver();

    let keys = resolver.resolve("rack/web1", Some("t")).unwrap();
    assert_eq!(keys.as_str(), line(BOB_KEY));
}

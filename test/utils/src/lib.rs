use std::env;

pub fn insta_snapshot<F: FnOnce()>(f: F) {
    let mut settings = insta::Settings::clone_current();
    let snapshot_path = env::current_dir().unwrap().join("./test/snapshots");
    settings.set_snapshot_path(snapshot_path);
    settings.bind(f);
}

pub fn proposal_fixture() -> &'static str {
    return r#"
# Proposal for Acme Logistics

## Summary

Acme wants to replace its spreadsheet based dispatch planning with a web platform that drivers can use from their phones.

## Scope

- Route planning dashboard for dispatchers
- Driver mobile app with live status updates
- Weekly reporting exported to the finance team

## Timeline

Eight weeks, delivered in two milestones.
"#
    .trim();
}

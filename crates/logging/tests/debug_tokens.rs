//! Integration tests for `NAME[N]` debug token handling.

use logging::{DebugFlag, VerbosityConfig};

#[test]
fn every_flag_name_is_accepted() {
    for flag in DebugFlag::ALL {
        let mut config = VerbosityConfig::default();
        config
            .apply_debug_flag(&format!("{}3", flag.name()))
            .unwrap();
        assert_eq!(config.debug.get(flag), 3, "{}", flag.name());
        for other in DebugFlag::ALL.into_iter().filter(|other| *other != flag) {
            assert_eq!(config.debug.get(other), 0);
        }
    }
}

#[test]
fn tokens_without_level_default_to_one() {
    let mut config = VerbosityConfig::default();
    config.apply_debug_flag("inherit").unwrap();
    assert_eq!(config.debug.inherit, 1);
    assert_eq!(config.filter_directives(), "nfs4acl::inherit=info");
}

#[test]
fn tokens_refine_a_verbose_level() {
    let mut config = VerbosityConfig::from_verbose_level(3);
    config.apply_debug_list("store0,text3").unwrap();
    assert_eq!(
        config.filter_directives(),
        "nfs4acl::acl=debug,nfs4acl::inherit=debug,nfs4acl::xdr=debug,\
         nfs4acl::text=trace,nfs4acl::json=debug"
    );
}

#[test]
fn rejected_tokens_leave_earlier_tokens_applied() {
    let mut config = VerbosityConfig::default();
    let err = config.apply_debug_list("acl2,flist,xdr").unwrap_err();
    assert!(err.contains("flist"));
    assert_eq!(config.debug.acl, 2);
    assert_eq!(config.debug.xdr, 0);
}

#[test]
fn uppercase_names_are_unknown() {
    let mut config = VerbosityConfig::default();
    assert!(config.apply_debug_flag("ACL").is_err());
    assert!(config.apply_debug_flag("2").is_err());
}

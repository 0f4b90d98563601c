//! Integration tests for command-line parsing

use std::net::IpAddr;
use std::path::PathBuf;

use clap::Parser;
use cognito_auth_cli::{Cli, Commands};

#[test]
fn test_login_url_with_state_and_config() {
    let cli = Cli::try_parse_from([
        "cognito-auth",
        "--config",
        "auth.toml",
        "login-url",
        "--state",
        "abc",
    ])
    .unwrap();

    assert_eq!(cli.config, Some(PathBuf::from("auth.toml")));
    assert!(matches!(cli.command, Commands::LoginUrl { state: Some(ref s) } if s == "abc"));
}

#[test]
fn test_config_flag_is_global() {
    let cli = Cli::try_parse_from(["cognito-auth", "logout-url", "-c", "other.toml"]).unwrap();

    assert_eq!(cli.config, Some(PathBuf::from("other.toml")));
    assert!(matches!(cli.command, Commands::LogoutUrl));
}

#[test]
fn test_exchange_parses_ip() {
    let cli = Cli::try_parse_from([
        "cognito-auth",
        "exchange",
        "--code",
        "code-123",
        "--ip",
        "2001:db8::1",
    ])
    .unwrap();

    let expected: IpAddr = "2001:db8::1".parse().unwrap();
    match cli.command {
        Commands::Exchange { code, ip } => {
            assert_eq!(code, "code-123");
            assert_eq!(ip, Some(expected));
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_exchange_rejects_bad_ip() {
    let result = Cli::try_parse_from([
        "cognito-auth",
        "exchange",
        "--code",
        "code-123",
        "--ip",
        "not-an-ip",
    ]);

    assert!(result.is_err());
}

#[test]
fn test_exchange_requires_code() {
    assert!(Cli::try_parse_from(["cognito-auth", "exchange"]).is_err());
}

#[test]
fn test_history_default_limit() {
    let cli = Cli::try_parse_from(["cognito-auth", "history", "--user-id", "42"]).unwrap();

    assert!(matches!(
        cli.command,
        Commands::History {
            user_id: 42,
            limit: 20
        }
    ));
}

#[test]
fn test_history_limit_must_be_positive() {
    for limit in ["0", "-5"] {
        let result =
            Cli::try_parse_from(["cognito-auth", "history", "--user-id", "42", "--limit", limit]);
        assert!(result.is_err(), "limit {limit} should be rejected");
    }

    let cli = Cli::try_parse_from(["cognito-auth", "history", "--user-id", "42", "-l", "5"])
        .unwrap();
    assert!(matches!(cli.command, Commands::History { user_id: 42, limit: 5 }));
}

#[test]
fn test_prune_history_force() {
    let cli =
        Cli::try_parse_from(["cognito-auth", "prune-history", "--days", "90", "--force"]).unwrap();

    assert!(matches!(
        cli.command,
        Commands::PruneHistory {
            days: 90,
            force: true
        }
    ));
}

#[test]
fn test_refresh_and_userinfo_arguments() {
    let cli = Cli::try_parse_from([
        "cognito-auth",
        "refresh",
        "--user-id",
        "7",
        "--refresh-token",
        "r-token",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Commands::Refresh { user_id: 7, ref refresh_token } if refresh_token == "r-token"
    ));

    let cli =
        Cli::try_parse_from(["cognito-auth", "userinfo", "--access-token", "a-token"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Userinfo { ref access_token } if access_token == "a-token"
    ));
}

#[test]
fn test_migrate() {
    let cli = Cli::try_parse_from(["cognito-auth", "migrate"]).unwrap();
    assert!(matches!(cli.command, Commands::Migrate));
}

use super::*;

#[test]
fn parses_minimal_ios_invocation() {
    let cli = Cli::try_parse_from(["asokit", "soccer,football", "--platform", "ios"])
        .expect("expected valid cli args");

    assert_eq!(cli.keywords, "soccer,football");
    assert_eq!(cli.platform, PlatformArg::Ios);
    assert!(cli.app_id.is_none());
    assert_eq!(cli.country, "US");
    assert_eq!(cli.output, OutputFormat::Json);
}

#[test]
fn parses_short_flags() {
    let cli = Cli::try_parse_from([
        "asokit",
        "soccer",
        "-p",
        "gplay",
        "-a",
        "com.sofascore.app",
        "-c",
        "gb",
        "-o",
        "table",
    ])
    .expect("expected valid cli args");

    assert_eq!(cli.platform, PlatformArg::Gplay);
    assert_eq!(cli.app_id.as_deref(), Some("com.sofascore.app"));
    assert_eq!(cli.country, "gb");
    assert_eq!(cli.output, OutputFormat::Table);
}

#[test]
fn platform_is_required() {
    assert!(Cli::try_parse_from(["asokit", "soccer"]).is_err());
}

#[test]
fn keywords_are_required() {
    assert!(Cli::try_parse_from(["asokit", "--platform", "ios"]).is_err());
}

#[test]
fn unknown_platform_is_rejected() {
    assert!(Cli::try_parse_from(["asokit", "soccer", "--platform", "android"]).is_err());
}

#[test]
fn unknown_output_is_rejected() {
    assert!(Cli::try_parse_from(["asokit", "soccer", "-p", "ios", "-o", "csv"]).is_err());
}

#[test]
fn platform_arg_maps_to_core_platform() {
    assert_eq!(Platform::from(PlatformArg::Gplay), Platform::Gplay);
    assert_eq!(Platform::from(PlatformArg::Ios), Platform::Ios);
}

#[test]
fn cli_definition_is_consistent() {
    use clap::CommandFactory;
    Cli::command().debug_assert();
}

#[tokio::test]
async fn blank_keyword_list_fails_before_any_fetch() {
    let cli = Cli::try_parse_from(["asokit", " , ,", "--platform", "gplay"]).unwrap();
    let config = asokit_core::load_app_config_from_env().expect("default config");

    let err = run(&cli, &config).await.unwrap_err();
    assert!(
        err.to_string().contains("no keywords"),
        "unexpected error: {err}"
    );
}

#[tokio::test]
async fn gplay_run_fails_when_browser_cannot_start() {
    let cli = Cli::try_parse_from(["asokit", "soccer", "--platform", "gplay"]).unwrap();
    let mut config = asokit_core::load_app_config_from_env().expect("default config");
    config.browser.chrome_executable = Some("/nonexistent/chrome".into());

    let err = run(&cli, &config).await.unwrap_err();
    assert!(
        err.to_string().contains("browser automation is unavailable"),
        "unexpected error: {err}"
    );
}

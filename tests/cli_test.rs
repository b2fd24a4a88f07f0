//! CLI Command Tests
//!
//! Argument parsing, exit codes and the offline command paths.

// =============================================================================
// CLI Argument Parsing Tests
// =============================================================================

mod cli_parsing {
    use clap::Parser;
    use popstream::cli::{Cli, Command, ContentFilter, KindFilter};

    #[test]
    fn test_no_args_is_tui_mode() {
        let cli = Cli::parse_from(["popstream"]);
        assert!(!cli.is_cli_mode());
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_search_with_kind_and_limit() {
        let cli = Cli::parse_from(["popstream", "search", "the batman", "-k", "tv", "--limit", "5"]);
        assert!(cli.is_cli_mode());
        match cli.command {
            Some(Command::Search(cmd)) => {
                assert_eq!(cmd.query, "the batman");
                assert_eq!(cmd.kind, KindFilter::Tv);
                assert_eq!(cmd.limit, 5);
            }
            _ => panic!("Expected Search command"),
        }
    }

    #[test]
    fn test_search_requires_query() {
        assert!(Cli::try_parse_from(["popstream", "search"]).is_err());
    }

    #[test]
    fn test_trending_alias_and_kind() {
        let cli = Cli::parse_from(["popstream", "tr", "--kind", "tv"]);
        match cli.command {
            Some(Command::Trending(cmd)) => {
                assert_eq!(cmd.kind, ContentFilter::Tv);
                assert_eq!(cmd.limit, 20);
            }
            _ => panic!("Expected Trending command"),
        }
    }

    #[test]
    fn test_featured_seed() {
        let cli = Cli::parse_from(["popstream", "featured", "--seed", "42"]);
        match cli.command {
            Some(Command::Featured(cmd)) => {
                assert_eq!(cmd.kind, ContentFilter::Movie);
                assert_eq!(cmd.seed, Some(42));
            }
            _ => panic!("Expected Featured command"),
        }
    }

    #[test]
    fn test_route_width_and_globals() {
        let cli = Cli::parse_from([
            "popstream",
            "route",
            "/tv/1396",
            "-w",
            "80",
            "--json",
            "--config",
            "/tmp/popstream.toml",
        ]);
        assert!(cli.json);
        assert_eq!(
            cli.config.as_deref(),
            Some(std::path::Path::new("/tmp/popstream.toml"))
        );
        match cli.command {
            Some(Command::Route(cmd)) => {
                assert_eq!(cmd.path, "/tv/1396");
                assert_eq!(cmd.width, 80);
            }
            _ => panic!("Expected Route command"),
        }
    }

    #[test]
    fn test_invalid_kind_rejected() {
        assert!(Cli::try_parse_from(["popstream", "trending", "--kind", "person"]).is_err());
    }
}

// =============================================================================
// Command Execution Tests
// =============================================================================

mod cli_commands {
    use mockito::{Matcher, Server};
    use popstream::api::{Credential, TmdbClient};
    use popstream::cli::{ExitCode, KindFilter, Output, RouteCmd, SearchCmd, TrendingCmd, ContentFilter};
    use popstream::commands;
    use popstream::config::Config;
    use popstream::routes::{RouteKind, TopBar, Viewport};

    fn quiet() -> Output {
        Output {
            json: true,
            quiet: true,
        }
    }

    #[tokio::test]
    async fn test_search_network_error_exit_code() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/search/multi")
            .match_query(Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        let client = TmdbClient::with_base_url(Credential::AccessToken("tok".into()), server.url());
        let cmd = SearchCmd {
            query: "batman".into(),
            kind: KindFilter::Multi,
            limit: 20,
        };
        let code = commands::search_cmd(cmd, &client, &quiet()).await;
        assert_eq!(code, ExitCode::NetworkError);
    }

    #[tokio::test]
    async fn test_trending_success() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/trending/movie/day")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"results": [{"id": 550, "title": "Fight Club"}]}"#)
            .create_async()
            .await;

        let client = TmdbClient::with_base_url(Credential::AccessToken("tok".into()), server.url());
        let cmd = TrendingCmd {
            kind: ContentFilter::Movie,
            limit: 3,
        };
        let code = commands::trending_cmd(cmd, &client, &quiet()).await;
        assert_eq!(code, ExitCode::Success);
    }

    #[test]
    fn test_offline_search_finds_sample() {
        let client = commands::client_from(&Config::default());
        let cmd = SearchCmd {
            query: "inception".into(),
            kind: KindFilter::Movie,
            limit: 20,
        };
        let code = tokio_test::block_on(commands::search_cmd(cmd, &client, &quiet()));
        assert_eq!(code, ExitCode::Success);
    }

    #[test]
    fn test_route_command() {
        let config = Config {
            safe_area_bottom: 1,
            ..Config::default()
        };
        let cmd = RouteCmd {
            path: "/discover".into(),
            width: 60,
        };
        assert_eq!(commands::route_cmd(cmd, &config, &quiet()), ExitCode::Success);

        let report = commands::route_report("/discover", 60, 1);
        assert_eq!(report.viewport, Viewport::Compact);
        assert_eq!(report.chrome.route, RouteKind::Primary);
        assert_eq!(report.chrome.top_bar, TopBar::Nav);
        assert!(report.chrome.bottom_bar);
        assert_eq!(report.bottom_reserve, 4);
    }

    #[test]
    fn test_route_command_rejects_blank_path() {
        let cmd = RouteCmd {
            path: "  ".into(),
            width: 120,
        };
        assert_eq!(
            commands::route_cmd(cmd, &Config::default(), &quiet()),
            ExitCode::InvalidArgs
        );
    }
}

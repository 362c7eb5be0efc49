// ABOUTME: Integration tests for project file parsing and target resolution.
// ABOUTME: Tests YAML parsing, validation, and project discovery.

use kiln::error::Error;
use kiln::project::*;
use std::fs;

mod parsing {
    use super::*;

    #[test]
    fn parse_minimal_project() {
        let yaml = r#"
name: blinky
targets:
  - name: nrf52_blinky
    app: apps/blinky
    build: make -C apps/blinky
    download: hw/nrf52dk/download.sh
    debug: hw/nrf52dk/debug.sh
"#;
        let project = Project::from_yaml(yaml).unwrap();
        assert_eq!(project.name, "blinky");
        assert_eq!(project.targets.len(), 1);

        let target = project.target("nrf52_blinky").unwrap();
        assert_eq!(target.app.to_str(), Some("apps/blinky"));
        assert_eq!(target.build.program(), "make");
        assert_eq!(target.build.args().to_vec(), ["-C", "apps/blinky"]);
    }

    #[test]
    fn parse_argv_command_form() {
        let yaml = r#"
name: blinky
targets:
  - name: nrf52_blinky
    app: apps/blinky
    build: ["make", "BSP=nrf52dk", "all"]
    download: ["./download.sh"]
    debug: ["./debug.sh"]
"#;
        let project = Project::from_yaml(yaml).unwrap();
        let target = project.target("nrf52_blinky").unwrap();
        assert_eq!(target.build.program(), "make");
        assert_eq!(target.build.args().to_vec(), ["BSP=nrf52dk", "all"]);
        assert_eq!(target.download.program(), "./download.sh");
        assert!(target.download.args().is_empty());
    }

    #[test]
    fn missing_targets_returns_error() {
        let yaml = r#"
name: blinky
"#;
        let err = Project::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("targets"));
    }

    #[test]
    fn empty_targets_returns_error() {
        let yaml = r#"
name: blinky
targets: []
"#;
        let err = Project::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("at least one target"));
    }

    #[test]
    fn duplicate_target_names_are_rejected() {
        let yaml = r#"
name: blinky
targets:
  - name: nrf52_blinky
    app: apps/blinky
    build: make
    download: ./download.sh
    debug: ./debug.sh
  - name: nrf52_blinky
    app: apps/other
    build: make
    download: ./download.sh
    debug: ./debug.sh
"#;
        let err = Project::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("duplicate target name"));
    }

    #[test]
    fn invalid_target_name_is_rejected() {
        let yaml = r#"
name: blinky
targets:
  - name: "bad name"
    app: apps/blinky
    build: make
    download: ./download.sh
    debug: ./debug.sh
"#;
        let err = Project::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("target name"));
    }

    #[test]
    fn empty_command_is_rejected() {
        let yaml = r#"
name: blinky
targets:
  - name: nrf52_blinky
    app: apps/blinky
    build: ""
    download: ./download.sh
    debug: ./debug.sh
"#;
        let err = Project::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("command cannot be empty"));
    }
}

mod resolution {
    use super::*;

    fn two_target_project() -> Project {
        Project::from_yaml(
            r#"
name: demo
targets:
  - name: nrf52_blinky
    app: apps/blinky
    build: make
    download: ./download.sh
    debug: ./debug.sh
  - name: sim_blinky
    app: apps/blinky
    build: make
    download: ./download.sh
    debug: ./debug.sh
"#,
        )
        .unwrap()
    }

    #[test]
    fn known_target_resolves() {
        let project = two_target_project();
        let target = project.target("sim_blinky").unwrap();
        assert_eq!(target.name.as_str(), "sim_blinky");
    }

    #[test]
    fn unknown_target_resolves_to_none() {
        let project = two_target_project();
        assert!(project.target("bogus_target").is_none());
    }
}

mod discovery {
    use super::*;

    const MINIMAL: &str = r#"
name: demo
targets:
  - name: blinky
    app: apps/blinky
    build: make
    download: ./download.sh
    debug: ./debug.sh
"#;

    #[test]
    fn discover_loads_kiln_yml() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("kiln.yml"), MINIMAL).unwrap();

        let project = Project::discover(dir.path()).unwrap();
        assert_eq!(project.name, "demo");
        assert_eq!(project.root(), dir.path());
    }

    #[test]
    fn discover_accepts_yaml_extension() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("kiln.yaml"), MINIMAL).unwrap();

        let project = Project::discover(dir.path()).unwrap();
        assert_eq!(project.name, "demo");
    }

    #[test]
    fn discover_without_project_file_fails() {
        let dir = tempfile::tempdir().unwrap();

        let err = Project::discover(dir.path()).unwrap_err();
        assert!(matches!(err, Error::ConfigNotFound(_)));
    }
}

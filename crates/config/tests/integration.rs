//! Integration tests for config

#[cfg(test)]
mod tests {
    use dockyard_config::*;
    use std::io::Write;
    use std::path::PathBuf;
    use std::sync::Mutex;
    use tempfile::NamedTempFile;

    // Mutex to ensure env var tests don't run concurrently
    static ENV_TEST_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        for var in [
            "DOCKYARD_NAME",
            "DOCKYARD_INSTALL_DIR",
            "DOCKYARD_NO_APT",
            "DOCKYARD_MAKE_DESKTOP",
        ] {
            std::env::remove_var(var);
        }
    }

    #[tokio::test]
    async fn test_load_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
[install]
name = "Zed"
install_dir = "~/Tools/zed"
make_desktop = false
dependency_packages = []

[bundle]
entry_point = "zed"

[desktop]
comment = "Code editor"
        "#
        )
        .unwrap();

        let config = Config::load_from_file(temp_file.path()).await.unwrap();
        assert_eq!(config.install.name, "Zed");
        assert!(!config.install.make_desktop);
        assert!(config.install.dependency_packages.is_empty());
        assert_eq!(config.bundle.entry_point, "zed");
        // untouched fields keep their defaults
        assert_eq!(config.bundle.sandbox_helper, "chrome-sandbox");
        assert_eq!(config.desktop.comment, "Code editor");
        assert_eq!(config.desktop.categories, "Development;IDE;");

        let layout = HomeLayout::new("/home/ada");
        assert_eq!(
            config.user_install_root(&layout),
            PathBuf::from("/home/ada/Tools/zed")
        );
    }

    #[tokio::test]
    async fn test_invalid_toml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "[install\nname = 1").unwrap();

        let result = Config::load_from_file(temp_file.path()).await;
        assert!(result.is_err());
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        let layout = HomeLayout::new("/home/ada");
        assert_eq!(config.install.name, "Cursor");
        assert_eq!(config.slug(), "cursor");
        assert_eq!(
            config.user_install_root(&layout),
            PathBuf::from("/home/ada/Apps/cursor")
        );
        assert_eq!(config.system_install_root(), PathBuf::from("/opt/cursor"));
        assert_eq!(
            config.global_gitconfig(&layout),
            PathBuf::from("/home/ada/.gitconfig")
        );
        assert_eq!(
            config.gitconfig_fragment_dir(&layout),
            PathBuf::from("/home/ada")
        );
        assert_eq!(config.install.dependency_packages, vec!["libfuse2t64"]);
    }

    #[test]
    fn test_merge_env() {
        let _guard = ENV_TEST_MUTEX.lock().unwrap();
        clear_env();

        std::env::set_var("DOCKYARD_NAME", "Obsidian");
        std::env::set_var("DOCKYARD_NO_APT", "yes");
        std::env::set_var("DOCKYARD_MAKE_DESKTOP", "0");

        let mut config = Config::default();
        config.merge_env().unwrap();

        assert_eq!(config.install.name, "Obsidian");
        assert!(config.install.skip_dependencies);
        assert!(!config.install.make_desktop);

        clear_env();
    }

    #[test]
    fn test_invalid_env_value() {
        let _guard = ENV_TEST_MUTEX.lock().unwrap();
        clear_env();

        std::env::set_var("DOCKYARD_NO_APT", "maybe");

        let mut config = Config::default();
        let result = config.merge_env();
        assert!(result.is_err());

        clear_env();
    }
}

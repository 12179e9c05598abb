//! npm integration.
//!
//! The wizard needs two things from npm: the `peerDependencies` of plugins
//! and shareable configs, and `npm install --save-dev`. Both go through the
//! [`PackageManager`] trait.

use std::{
    collections::HashMap,
    io,
    process::Stdio,
    sync::{Arc, Mutex},
};

use anyhow::{Context, bail};
use futures::future::try_join_all;
use rule_inspect::LintConfig;
use serde_json::{Map, Value};
use tokio::sync::OnceCell;

use super::InitError;
use crate::{ctx::InitContext, utils::Command};

/// Package manager operations used by the wizard.
#[allow(async_fn_in_trait)]
pub trait PackageManager {
    /// `peerDependencies` of a package spec such as `eslint-plugin-react@latest`.
    async fn peer_dependencies(&self, package: &str) -> anyhow::Result<Map<String, Value>>;

    /// Installs packages as development dependencies.
    async fn install(&self, packages: &[String]) -> anyhow::Result<()>;
}

type PeerCache = Mutex<HashMap<String, Arc<OnceCell<Map<String, Value>>>>>;

/// The `npm` command line client.
pub struct Npm {
    ctx: InitContext,
    cache: PeerCache,
}

impl Npm {
    pub fn new(ctx: &InitContext) -> Self {
        Self {
            ctx: ctx.clone(),
            cache: Mutex::default(),
        }
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = self.ctx.npm();
        cmd.args(args);
        debug!("EXEC {}", cmd.display());
        cmd
    }

    /// `npm install --save-dev` for `packages`.
    pub fn install_command(&self, packages: &[String]) -> Command {
        let mut args = vec!["install", "--save-dev"];
        args.extend(packages.iter().map(String::as_str));
        self.command(&args)
    }

    fn cell(&self, package: &str) -> Arc<OnceCell<Map<String, Value>>> {
        let mut cache = match self.cache.lock() {
            Ok(cache) => cache,
            Err(poisoned) => poisoned.into_inner(),
        };
        match cache.get(package) {
            Some(cell) => {
                debug!("CACHE_HIT npm show --json {package} peerDependencies");
                Arc::clone(cell)
            }
            None => {
                let cell = Arc::new(OnceCell::new());
                cache.insert(package.to_string(), Arc::clone(&cell));
                cell
            }
        }
    }

    async fn show_peer_dependencies(&self, package: &str) -> anyhow::Result<Map<String, Value>> {
        self.ctx
            .log(format!("Checking peer dependencies of '{package}'."));
        let output = self
            .command(&["show", "--json", package, "peerDependencies"])
            .into_async()
            .stdin(Stdio::null())
            .stderr(Stdio::inherit())
            .output()
            .await
            .map_err(spawn_error)?;
        debug!("EXEC finish '{}'", output.status);
        if !output.status.success() {
            bail!(
                "npm exited with non-zero code: {}",
                output.status.code().unwrap_or(1)
            );
        }

        let text = String::from_utf8_lossy(&output.stdout);
        parse_peer_dependencies(&text)
            .with_context(|| format!("unexpected `npm show` output for '{package}'"))
    }
}

impl PackageManager for Npm {
    async fn peer_dependencies(&self, package: &str) -> anyhow::Result<Map<String, Value>> {
        let cell = self.cell(package);
        let result = cell
            .get_or_try_init(|| self.show_peer_dependencies(package))
            .await?;
        debug!("PEER_DEPS '{package}' → {}", Value::Object(result.clone()));
        Ok(result.clone())
    }

    async fn install(&self, packages: &[String]) -> anyhow::Result<()> {
        let cmd = self.install_command(packages);
        cmd.print_cmd();
        let status = cmd
            .into_async()
            .status()
            .await
            .map_err(spawn_error)?;
        debug!("EXEC finish '{status}'");
        if !status.success() {
            bail!("npm exited with non-zero code: {}", status.code().unwrap_or(1));
        }
        Ok(())
    }
}

fn spawn_error(error: io::Error) -> anyhow::Error {
    debug!("EXEC error '{error}'");
    if error.kind() == io::ErrorKind::NotFound {
        InitError::NpmNotFound.into()
    } else {
        anyhow::Error::new(error).context("failed to execute npm")
    }
}

/// Parses `npm show --json` output. Empty output means no peer dependencies.
pub fn parse_peer_dependencies(text: &str) -> anyhow::Result<Map<String, Value>> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(Map::new());
    }
    match serde_json::from_str(text)? {
        Value::Object(map) => Ok(map),
        other => bail!("expected an object, got {other}"),
    }
}

/// Packages a configuration depends on, as `name@range`.
///
/// Every plugin and every shareable config (other than `eslint:` and
/// `plugin:` entries) is required at `latest`, together with its peer
/// dependencies. `eslint` itself is added or removed according to
/// `install_eslint`.
pub async fn fetch_plugins_and_configs<M: PackageManager + ?Sized>(
    manager: &M,
    config: &LintConfig,
    install_eslint: bool,
) -> anyhow::Result<Vec<String>> {
    let mut packages: Vec<String> = config
        .plugins()
        .iter()
        .map(|name| format!("eslint-plugin-{name}"))
        .collect();
    packages.extend(
        config
            .extends()
            .iter()
            .filter(|name| !name.starts_with("eslint:") && !name.starts_with("plugin:"))
            .map(|name| format!("eslint-config-{name}")),
    );

    let mut deps = Map::new();
    for package in &packages {
        deps.insert(package.clone(), "latest".into());
    }

    let specs: Vec<String> = packages.iter().map(|p| format!("{p}@latest")).collect();
    let peers = try_join_all(specs.iter().map(|spec| manager.peer_dependencies(spec))).await?;
    for peer in peers {
        deps.extend(peer);
    }

    if install_eslint && !deps.contains_key("eslint") {
        deps.insert("eslint".into(), "latest".into());
    }
    if !install_eslint {
        deps.shift_remove("eslint");
    }

    debug!("DEPS {}", Value::Object(deps.clone()));
    Ok(deps
        .into_iter()
        .map(|(name, range)| match range {
            Value::String(range) => format!("{name}@{range}"),
            other => format!("{name}@{other}"),
        })
        .collect())
}

/// Installs `packages`, doing nothing when there are none.
pub async fn install_packages<M: PackageManager + ?Sized>(
    ctx: &InitContext,
    manager: &M,
    packages: &[String],
) -> anyhow::Result<()> {
    if packages.is_empty() {
        debug!("NO_DEPS");
        return Ok(());
    }

    let list: String = packages.iter().map(|p| format!("\n    {p}")).collect();
    ctx.log(format!("Installing dependencies:{list}"));
    manager.install(packages).await
}


#[cfg(test)]
mod tests {
    use super::{fake::FakeRegistry, *};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn config(value: Value) -> LintConfig {
        LintConfig::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn test_plugins_and_configs_with_peers() {
        let registry = FakeRegistry::with_peers([
            (
                "eslint-config-airbnb@latest",
                json!({"eslint": "^4.9.0", "eslint-plugin-react": "^7.4.0"}),
            ),
            ("eslint-plugin-react@latest", json!({"eslint": "^3.0.0 || ^4.0.0"})),
        ]);
        let config = config(json!({
            "extends": ["eslint:recommended", "plugin:react/recommended", "airbnb"],
            "plugins": ["react"]
        }));

        let packages = fetch_plugins_and_configs(&registry, &config, true)
            .await
            .unwrap();

        assert_eq!(
            packages,
            vec![
                "eslint-plugin-react@^7.4.0",
                "eslint-config-airbnb@latest",
                "eslint@^4.9.0",
            ]
        );
        assert_eq!(
            *registry.shown.borrow(),
            vec!["eslint-plugin-react@latest", "eslint-config-airbnb@latest"]
        );
    }

    #[tokio::test]
    async fn test_eslint_is_added_or_removed() {
        let registry = FakeRegistry::with_peers([(
            "eslint-config-standard@latest",
            json!({"eslint": ">=4.18.0"}),
        )]);
        let standard = config(json!({"extends": "standard"}));

        assert_eq!(
            fetch_plugins_and_configs(&registry, &standard, false)
                .await
                .unwrap(),
            vec!["eslint-config-standard@latest"]
        );
        assert_eq!(
            fetch_plugins_and_configs(&registry, &LintConfig::new(), true)
                .await
                .unwrap(),
            vec!["eslint@latest"]
        );
    }

    #[tokio::test]
    async fn test_registry_failure_is_propagated() {
        let registry = FakeRegistry::with_peers([("eslint-config-google@latest", json!("oops"))]);
        let google = config(json!({"extends": "google"}));
        assert!(
            fetch_plugins_and_configs(&registry, &google, true)
                .await
                .is_err()
        );
    }

    #[tokio::test]
    async fn test_install_skips_empty_list() {
        let registry = FakeRegistry::default();
        let ctx = InitContext::default();

        install_packages(&ctx, &registry, &[]).await.unwrap();
        install_packages(&ctx, &registry, &["eslint@latest".to_string()])
            .await
            .unwrap();

        assert_eq!(
            *registry.installed.borrow(),
            vec![vec!["eslint@latest".to_string()]]
        );
    }

    #[test]
    fn test_parse_peer_dependencies() {
        assert!(parse_peer_dependencies("  \n").unwrap().is_empty());
        assert_eq!(
            Value::Object(parse_peer_dependencies(r#"{"eslint": "^5.0.0"}"#).unwrap()),
            json!({"eslint": "^5.0.0"})
        );
        assert!(parse_peer_dependencies("[]").is_err());
    }

    #[test]
    fn test_install_command_line() {
        let mut ctx = InitContext::default();
        ctx.settings.npm.program = "npm".into();
        let npm = Npm::new(&ctx);

        let cmd = npm.install_command(&[
            "eslint-config-standard@latest".to_string(),
            "eslint@>=4.18.0".to_string(),
        ]);
        assert_eq!(
            cmd.display(),
            "npm install --save-dev eslint-config-standard@latest eslint@>=4.18.0"
        );
    }

    #[tokio::test]
    async fn test_missing_npm_is_reported() {
        let mut ctx = InitContext::default();
        ctx.cwd = std::env::temp_dir();
        ctx.settings.npm.program = "definitely-not-an-npm-binary".into();
        let npm = Npm::new(&ctx);

        let err = npm
            .install(&["eslint@latest".to_string()])
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<InitError>(),
            Some(InitError::NpmNotFound)
        ));
    }
}

//! Install orchestration
//!
//! For each discovered module, in manifest order:
//!
//! 1. register its provider in the bootstrap file (skip the module if the
//!    provider is already there or cannot be registered)
//! 2. merge its libraries into the project manifest
//! 3. run or report its finishing command
//! 4. remove it from the project again if it asks to be cleaned
//!
//! Missing files and malformed documents skip work. Only store failures
//! abort the run.

use takeoff_fs::ProjectStore;
use takeoff_patch::{PatchOutcome, is_registered, register};

use crate::cleanup::{CleanupSummary, clean_module};
use crate::command::{CommandOutcome, CommandRunner, handle_command};
use crate::discovery::{Candidate, discover, load_project_manifest};
use crate::merge::{MergeSummary, merge_libraries};
use crate::{InstallerConfig, Reporter, Result, reporter};

/// How far the install of one module got.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallStage {
    Discovered,
    ProviderChecked,
    ProviderRegistered,
    LibrariesMerged,
    CommandHandled,
    /// Installed and removed from the project again.
    CleanedUp,
    /// Installed, module left in place.
    Done,
}

/// Why a module was not installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The descriptor names no provider.
    NoProvider,
    /// The provider is already in the bootstrap file, or there is no
    /// bootstrap file to register it in.
    AlreadyRegistered,
    /// The bootstrap call was not found in the bootstrap file.
    AnchorNotFound,
}

/// Result of installing one module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleReport {
    pub package: String,
    pub stage: InstallStage,
    pub skipped: Option<SkipReason>,
    pub merge: MergeSummary,
    pub command: CommandOutcome,
    pub cleanup: Option<CleanupSummary>,
}

impl ModuleReport {
    fn new(package: &str) -> Self {
        Self {
            package: package.to_string(),
            stage: InstallStage::Discovered,
            skipped: None,
            merge: MergeSummary::default(),
            command: CommandOutcome::NoCommand,
            cleanup: None,
        }
    }

    fn skip(mut self, reason: SkipReason) -> Self {
        self.skipped = Some(reason);
        self
    }

    pub fn installed(&self) -> bool {
        self.skipped.is_none()
    }
}

/// Result of a whole install run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallReport {
    pub modules: Vec<ModuleReport>,
}

impl InstallReport {
    pub fn installed_count(&self) -> usize {
        self.modules.iter().filter(|m| m.installed()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

/// Installs take-off modules into a project.
pub struct ModuleInstaller<'a> {
    store: &'a dyn ProjectStore,
    runner: &'a dyn CommandRunner,
    reporter: &'a dyn Reporter,
    config: InstallerConfig,
}

impl<'a> ModuleInstaller<'a> {
    pub fn new(
        store: &'a dyn ProjectStore,
        runner: &'a dyn CommandRunner,
        reporter: &'a dyn Reporter,
        config: InstallerConfig,
    ) -> Self {
        Self {
            store,
            runner,
            reporter,
            config,
        }
    }

    /// Install every discovered module, stopping at the first store error.
    pub fn install(&self) -> Result<InstallReport> {
        let candidates = discover(self.store, &self.config)?;
        tracing::debug!(count = candidates.len(), "discovered modules");

        let mut report = InstallReport::default();
        for candidate in &candidates {
            report.modules.push(self.install_module(candidate)?);
        }
        Ok(report)
    }

    fn install_module(&self, candidate: &Candidate) -> Result<ModuleReport> {
        let package = candidate.package.as_str();
        let descriptor = &candidate.descriptor;
        let mut report = ModuleReport::new(package);

        if !descriptor.has_provider() {
            tracing::debug!(package, "descriptor has no provider");
            return Ok(report.skip(SkipReason::NoProvider));
        }
        let provider = self.config.provider_id(&descriptor.provider);

        let bootstrap = self.store.read_optional(&self.config.bootstrap_file)?;
        report.stage = InstallStage::ProviderChecked;
        let text = match bootstrap {
            Some(text) if !is_registered(Some(text.as_str()), &self.config.anchor, &provider) => {
                text
            }
            _ => {
                tracing::debug!(package, provider = %provider, "provider already registered");
                return Ok(report.skip(SkipReason::AlreadyRegistered));
            }
        };

        match register(&text, &self.config.anchor, &provider) {
            PatchOutcome::Patched(updated) => {
                self.store.update(&self.config.bootstrap_file, &updated)?;
            }
            PatchOutcome::AnchorNotFound | PatchOutcome::NotRegistered => {
                self.reporter.warn(&reporter::anchor_not_found(
                    package,
                    &self.config.anchor,
                    &self.config.bootstrap_file,
                ));
                return Ok(report.skip(SkipReason::AnchorNotFound));
            }
        }
        report.stage = InstallStage::ProviderRegistered;
        self.reporter.info(&reporter::provider_installed(package));

        if !descriptor.libraries.is_empty() {
            report.merge = self.merge(candidate)?;
        }
        report.stage = InstallStage::LibrariesMerged;

        report.command = handle_command(
            descriptor,
            package,
            self.store.root(),
            &self.config,
            self.runner,
            self.reporter,
        );
        report.stage = InstallStage::CommandHandled;

        if descriptor.clean {
            report.cleanup = Some(clean_module(self.store, &self.config, package, &provider)?);
            report.stage = InstallStage::CleanedUp;
            self.reporter.info(&reporter::package_cleaned(package));
        } else {
            report.stage = InstallStage::Done;
        }

        Ok(report)
    }

    fn merge(&self, candidate: &Candidate) -> Result<MergeSummary> {
        let Some(mut manifest) = load_project_manifest(self.store, &self.config)? else {
            return Ok(MergeSummary {
                skipped: true,
                ..Default::default()
            });
        };

        let summary = merge_libraries(&mut manifest, &candidate.descriptor.libraries, &self.config);
        if summary.changed() {
            self.store.update(
                &self.config.manifest_file,
                &manifest.to_json_string(&self.config.manifest_file)?,
            )?;
            tracing::debug!(
                package = %candidate.package,
                added = ?summary.dependencies_added,
                "merged libraries"
            );
        }
        Ok(summary)
    }
}

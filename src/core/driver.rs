use anyhow::{anyhow, Context, Result};

use crate::analyzers::{Analyzer, FileContext, ReferenceContext};
use crate::ast::AstProvider;
use crate::cache::CacheStore;
use crate::logging::Logger;
use crate::project::{FileGatherer, ProjectInputData, ProjectMetaProvider};

use super::compat::check_compatibility;
use super::config::{unwrap_prior_result, AnalyzerConfig};
use super::identifier::derive_identifier;
use super::normalize::finalize_result;
use super::result::{is_empty_result, AnalyzerQueryResult, FileEntry, ProjectMeta, QueryOutput};

/// Collaborators injected into the driver.
pub struct Collaborators<'a> {
    pub project_meta: &'a dyn ProjectMetaProvider,
    pub gatherer: &'a dyn FileGatherer,
    pub ast: &'a dyn AstProvider,
    pub cache: &'a dyn CacheStore,
    pub logger: &'a dyn Logger,
}

/// Generic analyzer driver: runs the prepare → traverse → finalize lifecycle
/// for any [`Analyzer`] capability, short-circuiting on an incompatibility
/// skip-result or a cache hit. At most one AST traversal happens per unique
/// (project pair, configuration, analyzer) combination.
pub struct AnalyzerDriver<'a, A: Analyzer> {
    analyzer: A,
    collaborators: Collaborators<'a>,
}

struct PreparedState {
    target_meta: ProjectMeta,
    reference_meta: Option<ProjectMeta>,
    identifier: String,
    target_data: ProjectInputData,
    reference_data: Option<ProjectInputData>,
}

enum Prepared {
    ShortCircuit(AnalyzerQueryResult),
    Continue(Box<PreparedState>),
}

impl<'a, A: Analyzer> AnalyzerDriver<'a, A> {
    pub fn new(analyzer: A, collaborators: Collaborators<'a>) -> Self {
        Self {
            analyzer,
            collaborators,
        }
    }

    /// Run one full analysis lifecycle for the given configuration.
    pub fn execute(&self, config: AnalyzerConfig) -> Result<AnalyzerQueryResult> {
        match self.prepare(&config)? {
            Prepared::ShortCircuit(result) => Ok(result),
            Prepared::Continue(state) => {
                let query_output = self.traverse(&state)?;
                self.finalize(query_output, &state, &config)
            }
        }
    }

    fn prepare(&self, config: &AnalyzerConfig) -> Result<Prepared> {
        let logger = self.collaborators.logger;

        let target_prior = config
            .target_project_result
            .as_ref()
            .map(unwrap_prior_result)
            .transpose()
            .context("invalid targetProjectResult")?;
        let reference_prior = config
            .reference_project_result
            .as_ref()
            .map(unwrap_prior_result)
            .transpose()
            .context("invalid referenceProjectResult")?;

        let target_meta = match &target_prior {
            Some(prior) => prior
                .analyzer_meta
                .target_project
                .clone()
                .ok_or_else(|| anyhow!("targetProjectResult carries no target project metadata"))?,
            None => {
                let path = config.target_project_path.as_deref().ok_or_else(|| {
                    anyhow!("targetProjectPath is required when no targetProjectResult is given")
                })?;
                self.collaborators.project_meta.get_project_meta(path)?
            }
        };

        let reference_meta = match &reference_prior {
            Some(prior) => prior.analyzer_meta.target_project.clone(),
            None => match config.reference_project_path.as_deref() {
                Some(path) => Some(self.collaborators.project_meta.get_project_meta(path)?),
                None => None,
            },
        };

        if self.analyzer.requires_reference() && reference_meta.is_none() {
            return Err(anyhow!(
                "analyzer '{}' requires a reference project",
                self.analyzer.name()
            ));
        }

        let identifier = derive_identifier(&target_meta, reference_meta.as_ref(), config)?;
        logger.debug(&format!("derived identifier {identifier}"));

        if let Some(reference_path) = config.reference_project_path.as_deref() {
            if !config.skip_check_match_compatibility {
                let target_path = config.target_project_path.as_deref().ok_or_else(|| {
                    anyhow!("targetProjectPath is required for the compatibility check")
                })?;
                let compatibility = check_compatibility(reference_path, target_path)?;
                if let Some(reason) = compatibility.reason {
                    logger.info(&format!(
                        "skipping {}@{} against {}: {}",
                        target_meta.name,
                        target_meta.version,
                        reference_meta
                            .as_ref()
                            .map(|meta| meta.name.as_str())
                            .unwrap_or("<reference>"),
                        reason.as_str()
                    ));
                    let skip_result = finalize_result(
                        self.analyzer.name(),
                        self.analyzer.required_ast_dialect(),
                        &identifier,
                        Some(&target_meta),
                        reference_meta.as_ref(),
                        config,
                        QueryOutput::Skipped(reason),
                    );
                    return Ok(Prepared::ShortCircuit(skip_result));
                }
            }
        }

        match self.collaborators.cache.get(self.analyzer.name(), &identifier) {
            Ok(Some(mut cached)) => {
                cached.analyzer_meta.from_cache = true;
                logger.info(&format!(
                    "cache hit for {} ({})",
                    self.analyzer.name(),
                    target_meta.name
                ));
                return Ok(Prepared::ShortCircuit(cached));
            }
            Ok(None) => {
                logger.debug(&format!("cache miss for {}", self.analyzer.name()));
            }
            Err(err) => {
                logger.debug(&format!("cache read failed, recomputing: {err:#}"));
            }
        }

        let target_data = match config.target_project_path.as_deref() {
            Some(path) => self
                .collaborators
                .gatherer
                .create_data_object(path, &config.gather_files_config)?,
            None => ProjectInputData::empty(),
        };
        logger.info(&format!(
            "gathered {} files from {}",
            target_data.files.len(),
            target_meta.name
        ));

        let reference_data = match config.reference_project_path.as_deref() {
            Some(path) => {
                let gather_config = config
                    .gather_files_config_reference
                    .as_ref()
                    .unwrap_or(&config.gather_files_config);
                Some(
                    self.collaborators
                        .gatherer
                        .create_data_object(path, gather_config)?,
                )
            }
            None => None,
        };

        Ok(Prepared::Continue(Box::new(PreparedState {
            target_meta,
            reference_meta,
            identifier,
            target_data,
            reference_data,
        })))
    }

    /// Per-file AST analysis: sequential, in discovery order, entries with an
    /// empty result dropped.
    fn traverse(&self, state: &PreparedState) -> Result<QueryOutput> {
        let annotated = self.collaborators.ast.add_ast_to(
            state.target_data.clone(),
            self.analyzer.required_ast_dialect(),
        )?;

        let reference = state.reference_meta.as_ref().map(|meta| ReferenceContext {
            meta,
            files: state.reference_data.as_ref(),
        });

        let mut entries = Vec::with_capacity(annotated.files.len());
        for file in &annotated.files {
            let ctx = FileContext {
                source_text: &file.source,
                relative_path: &file.relative_path,
                project_meta: &state.target_meta,
                reference,
            };
            let analysis = self
                .analyzer
                .analyze_file(&file.ast, &ctx)
                .with_context(|| format!("analysis failed for {}", file.relative_path.display()))?;

            if is_empty_result(&analysis.result) {
                continue;
            }
            entries.push(FileEntry {
                file: file.relative_path.to_string_lossy().into_owned(),
                meta: analysis.meta,
                result: analysis.result,
                project: None,
            });
        }

        self.collaborators
            .logger
            .debug(&format!("traversal produced {} entries", entries.len()));
        Ok(QueryOutput::Entries(entries))
    }

    fn finalize(
        &self,
        query_output: QueryOutput,
        state: &PreparedState,
        config: &AnalyzerConfig,
    ) -> Result<AnalyzerQueryResult> {
        let result = finalize_result(
            self.analyzer.name(),
            self.analyzer.required_ast_dialect(),
            &state.identifier,
            Some(&state.target_meta),
            state.reference_meta.as_ref(),
            config,
            query_output,
        );

        if let Err(err) =
            self.collaborators
                .cache
                .put(self.analyzer.name(), &state.identifier, &result)
        {
            self.collaborators
                .logger
                .debug(&format!("failed to write cache entry: {err:#}"));
        }

        self.collaborators.logger.success(&format!(
            "{} analyzed {}@{}",
            self.analyzer.name(),
            state.target_meta.name,
            state.target_meta.version
        ));
        Ok(result)
    }
}

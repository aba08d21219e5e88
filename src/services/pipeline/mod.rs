use crate::algorithms::initializer::InitializationMethod;
use crate::algorithms::{BaselineModel, FactorModel, FactorTable, RatingModel};
use crate::config::{Config, ModelKind};
use crate::data::{self, SubmissionWriter};
use crate::error::Result;
use crate::models::{HoldoutRecord, TestRecord};
use crate::services::evaluation::Evaluator;
use crate::services::serving::{BatchPredictor, BatchSummary};
use crate::services::training::{Trainer, TrainingReport};
use crate::store::RatingStore;
use crate::utils::metrics::ErrorMetrics;
use crate::utils::model_file_names;
use crate::utils::validation::validate_initialization;
use chrono::Local;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub model: ModelKind,
    pub ratings_loaded: usize,
    pub training: Option<TrainingReport>,
    pub holdout: ErrorMetrics,
    pub submission: BatchSummary,
    pub saved_factors: Option<(PathBuf, PathBuf)>,
}

pub struct BatchRun {
    config: Config,
}

impl BatchRun {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn run(&self) -> Result<RunSummary> {
        let mut rng = StdRng::seed_from_u64(self.config.training.seed);

        match self.config.model.kind {
            ModelKind::Svd => {
                let (mut users, mut items) = self.initialize_factors(&mut rng)?;
                let store = self.load_ratings()?;

                let trainer = Trainer::from_config(&self.config.training, self.config.model.features);
                let report = trainer.train(&store, &mut users, &mut items, &mut rng)?;

                let model = FactorModel::new(&users, &items);
                let holdout = self.evaluate(&model)?;
                let submission = self.write_submission(&model)?;
                let saved = self.save_factors(&users, &items)?;

                Ok(RunSummary {
                    model: ModelKind::Svd,
                    ratings_loaded: store.count(),
                    training: Some(report),
                    holdout,
                    submission,
                    saved_factors: Some(saved),
                })
            }
            ModelKind::Baseline => {
                let store = self.load_ratings()?;
                let model = BaselineModel::fit(
                    &store,
                    self.config.model.n_users,
                    self.config.model.n_items,
                    self.config.training.baseline_damping,
                )?;

                let holdout = self.evaluate(&model)?;
                let submission = self.write_submission(&model)?;

                Ok(RunSummary {
                    model: ModelKind::Baseline,
                    ratings_loaded: store.count(),
                    training: None,
                    holdout,
                    submission,
                    saved_factors: None,
                })
            }
        }
    }

    pub fn initialize_factors(&self, rng: &mut StdRng) -> Result<(FactorTable, FactorTable)> {
        let model = &self.config.model;
        info!(
            "Start initializing {} user and {} item rows with {} features",
            model.n_users, model.n_items, model.features
        );

        let mut users = FactorTable::new(model.n_users, model.features);
        let mut items = FactorTable::new(model.n_items, model.features);

        match &model.init_from {
            Some(files) => {
                info!(
                    "Loading factors from {} and {}",
                    files.users.display(),
                    files.items.display()
                );
                users.load(&files.users)?;
                items.load(&files.items)?;
            }
            None => {
                validate_initialization(&model.initialization)?;
                match &model.initialization {
                    InitializationMethod::InverseSqrt => {}
                    InitializationMethod::Constant { value } => {
                        users.initialize_constant(*value);
                        items.initialize_constant(*value);
                    }
                    method => {
                        users.initialize(method, rng);
                        items.initialize(method, rng);
                    }
                }
            }
        }

        Ok((users, items))
    }

    fn load_ratings(&self) -> Result<RatingStore> {
        let data = &self.config.data;
        let store = data::load_ratings(&data.train_path, data.train_format, self.config.model.capacity)?;
        if let Some(dump_path) = &data.dump_path {
            data::dump_ratings(&store, dump_path)?;
        }
        Ok(store)
    }

    fn evaluate<M: RatingModel>(&self, model: &M) -> Result<ErrorMetrics> {
        let data = &self.config.data;
        let records = data::open_table::<HoldoutRecord>(&data.holdout_path)?;
        Evaluator::new(data.holdout_count).evaluate(model, records)
    }

    fn write_submission<M: RatingModel>(&self, model: &M) -> Result<BatchSummary> {
        let data = &self.config.data;
        info!("Start filling out submission {}", data.submission_path.display());

        let records = data::open_table::<TestRecord>(&data.test_ids_path)?;
        let mut writer = SubmissionWriter::new(BufWriter::new(File::create(&data.submission_path)?))?;
        let summary = BatchPredictor::new().run(model, records, |prediction| writer.write(&prediction))?;
        writer.finish()?;
        Ok(summary)
    }

    fn save_factors(&self, users: &FactorTable, items: &FactorTable) -> Result<(PathBuf, PathBuf)> {
        let (users_path, items_path) = model_file_names(&self.config.model.output_dir, &Local::now());
        info!(
            "Saving model to {} and {}",
            users_path.display(),
            items_path.display()
        );
        users.save(&users_path)?;
        items.save(&items_path)?;
        Ok((users_path, items_path))
    }
}

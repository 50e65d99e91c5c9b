//! Schema and model status views

use serde::{Deserialize, Serialize};

use crate::logic::features::{Disease, LayoutInfo};
use crate::logic::model::{ClassifierKind, ModelRegistry};

/// Form description for one disease
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaInfo {
    pub layout: LayoutInfo,
    pub outcome_labels: [String; 2],
}

pub fn schema_info(disease_id: &str) -> Option<SchemaInfo> {
    Disease::from_id(disease_id).map(|disease| SchemaInfo {
        layout: LayoutInfo::for_disease(disease),
        outcome_labels: disease.outcome_labels().map(str::to_string),
    })
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelStatus {
    pub disease: Disease,
    pub classifier: ClassifierKind,
    pub feature_count: usize,
    pub layout_hash: u32,
    pub class_counts: [usize; 2],
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineStatus {
    pub seed: u64,
    pub n_samples: usize,
    pub n_estimators: usize,
    pub models: Vec<ModelStatus>,
}

pub fn engine_status(registry: &ModelRegistry) -> EngineStatus {
    let config = registry.config();
    let models = registry
        .diseases()
        .filter_map(|d| registry.get(d))
        .map(|model| ModelStatus {
            disease: model.disease,
            classifier: model.kind(),
            feature_count: model.scaler.n_features(),
            layout_hash: model.layout_hash,
            class_counts: model.class_counts,
        })
        .collect();

    EngineStatus {
        seed: config.seed,
        n_samples: config.n_samples,
        n_estimators: config.n_estimators,
        models,
    }
}

use std::sync::Arc;

use common::prelude::{CredentialVerifier, TokenAuthenticator};
use object_store::{BlobStoreError, NoteStore};

use super::classifier::{ChatClassifier, Classifier, ClassifierError, CLASSIFIER_API_KEY_ENV};
use super::service_config::Config;

/// Main service state, shared by every request handler
#[derive(Clone)]
pub struct State {
    verifier: Arc<CredentialVerifier>,
    authenticator: Arc<TokenAuthenticator>,
    notes: NoteStore,
    classifier: Option<Arc<dyn Classifier>>,
}

impl State {
    pub async fn from_config(config: &Config) -> Result<Self, StateSetupError> {
        // 1. Auth gate, both halves keyed on the same secret
        match &config.reference_secret {
            Some(secret) => tracing::info!(secret = %secret, "reference password hash loaded"),
            None => tracing::error!(
                "reference password hash is not configured; logins will fail until it is set"
            ),
        }
        let verifier = CredentialVerifier::new(config.reference_secret.clone());
        let authenticator = TokenAuthenticator::new(config.reference_secret.clone())
            .with_max_age(config.token_max_age);
        if let Some(max_age) = config.token_max_age {
            tracing::info!(max_age_secs = max_age.as_secs(), "token expiry enabled");
        }

        // 2. Note store
        tracing::debug!("ServiceState::from_config - opening note store");
        let notes = NoteStore::new(config.store.clone()).await?;

        // 3. Classifier
        let classifier = match &config.classifier {
            Some(classifier_config) => {
                if classifier_config.api_key.is_none() {
                    tracing::warn!(
                        "{} is not set; calling classifier without a key",
                        CLASSIFIER_API_KEY_ENV
                    );
                }
                let classifier = ChatClassifier::new(classifier_config)?;
                tracing::info!(endpoint = %classifier.endpoint(), "classifier configured");
                Some(Arc::new(classifier) as Arc<dyn Classifier>)
            }
            None => {
                tracing::info!("no classifier configured; /analyze will answer 503");
                None
            }
        };

        Ok(Self {
            verifier: Arc::new(verifier),
            authenticator: Arc::new(authenticator),
            notes,
            classifier,
        })
    }

    /// Assemble state from already-built parts.
    pub fn new(
        verifier: CredentialVerifier,
        authenticator: TokenAuthenticator,
        notes: NoteStore,
        classifier: Option<Arc<dyn Classifier>>,
    ) -> Self {
        Self {
            verifier: Arc::new(verifier),
            authenticator: Arc::new(authenticator),
            notes,
            classifier,
        }
    }

    pub fn verifier(&self) -> &CredentialVerifier {
        &self.verifier
    }

    pub fn authenticator(&self) -> &TokenAuthenticator {
        &self.authenticator
    }

    pub fn notes(&self) -> &NoteStore {
        &self.notes
    }

    pub fn classifier(&self) -> Option<&Arc<dyn Classifier>> {
        self.classifier.as_ref()
    }
}

impl AsRef<NoteStore> for State {
    fn as_ref(&self) -> &NoteStore {
        &self.notes
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StateSetupError {
    #[error("note store error: {0}")]
    NoteStore(#[from] BlobStoreError),
    #[error("classifier setup error: {0}")]
    Classifier(#[from] ClassifierError),
}

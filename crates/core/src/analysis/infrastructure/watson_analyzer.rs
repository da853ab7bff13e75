use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::analysis::domain::semantic_analyzer::{
    AnalysisError, AnalysisOptions, SemanticAnalyzer,
};
use crate::analysis::domain::semantic_result::{
    ConceptEntry, DocumentSentiment, KeywordEntry, SemanticResult,
};
use crate::shared::constants::WATSON_API_VERSION;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Semantic analyzer backed by IBM Watson Natural Language Understanding.
///
/// Issues one blocking `POST /v1/analyze` per call, authenticating with the
/// `apikey` basic-auth scheme.
pub struct WatsonAnalyzer {
    client: reqwest::blocking::Client,
    endpoint: String,
    api_key: String,
    version: String,
}

impl WatsonAnalyzer {
    pub fn new(service_url: &str, api_key: &str) -> Result<Self, AnalysisError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| AnalysisError::Request(Box::new(e)))?;
        Ok(Self {
            client,
            endpoint: endpoint(service_url),
            api_key: api_key.to_string(),
            version: WATSON_API_VERSION.to_string(),
        })
    }

    pub fn with_version(mut self, version: &str) -> Self {
        self.version = version.to_string();
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Identifies the instance and API version, for keying cached responses.
    pub fn cache_namespace(&self) -> String {
        format!("{}?version={}", self.endpoint, self.version)
    }
}

impl SemanticAnalyzer for WatsonAnalyzer {
    fn analyze(
        &self,
        text: &str,
        options: &AnalysisOptions,
    ) -> Result<SemanticResult, AnalysisError> {
        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("version", self.version.as_str())])
            .basic_auth("apikey", Some(&self.api_key))
            .json(&AnalyzeRequest::new(text, options))
            .send()
            .map_err(|e| AnalysisError::Request(Box::new(e)))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| AnalysisError::Request(Box::new(e)))?;
        if !status.is_success() {
            return Err(AnalysisError::Status {
                status: status.as_u16(),
                body,
            });
        }

        decode_response(&body)
    }
}

fn endpoint(service_url: &str) -> String {
    format!("{}/v1/analyze", service_url.trim_end_matches('/'))
}

// ─── Wire format ───

#[derive(Serialize)]
struct AnalyzeRequest<'a> {
    text: &'a str,
    features: Features,
}

#[derive(Serialize)]
struct Features {
    #[serde(skip_serializing_if = "Option::is_none")]
    sentiment: Option<DocumentFeature>,
    #[serde(skip_serializing_if = "Option::is_none")]
    emotion: Option<DocumentFeature>,
    #[serde(skip_serializing_if = "Option::is_none")]
    concepts: Option<LimitFeature>,
    #[serde(skip_serializing_if = "Option::is_none")]
    keywords: Option<KeywordsFeature>,
}

#[derive(Serialize)]
struct DocumentFeature {
    document: bool,
}

#[derive(Serialize)]
struct LimitFeature {
    limit: usize,
}

#[derive(Serialize)]
struct KeywordsFeature {
    sentiment: bool,
    emotion: bool,
    limit: usize,
}

impl<'a> AnalyzeRequest<'a> {
    fn new(text: &'a str, options: &AnalysisOptions) -> Self {
        let document = |enabled: bool| enabled.then_some(DocumentFeature { document: true });
        Self {
            text,
            features: Features {
                sentiment: document(options.sentiment),
                emotion: document(options.emotion),
                concepts: options.concept_limit.map(|limit| LimitFeature { limit }),
                keywords: options.keyword_limit.map(|limit| KeywordsFeature {
                    sentiment: false,
                    emotion: false,
                    limit,
                }),
            },
        }
    }
}

#[derive(Deserialize)]
struct AnalyzeResponse {
    #[serde(default)]
    sentiment: Option<SentimentFacet>,
    #[serde(default)]
    emotion: Option<EmotionFacet>,
    #[serde(default)]
    keywords: Vec<KeywordEntry>,
    #[serde(default)]
    concepts: Vec<ConceptEntry>,
}

#[derive(Deserialize)]
struct SentimentFacet {
    document: DocumentSentiment,
}

#[derive(Deserialize)]
struct EmotionFacet {
    document: EmotionDocument,
}

#[derive(Deserialize)]
struct EmotionDocument {
    emotion: BTreeMap<String, f64>,
}

fn decode_response(body: &str) -> Result<SemanticResult, AnalysisError> {
    let response: AnalyzeResponse =
        serde_json::from_str(body).map_err(|e| AnalysisError::Decode(e.to_string()))?;
    Ok(SemanticResult {
        sentiment: response.sentiment.map(|s| s.document),
        emotions: response
            .emotion
            .map(|e| e.document.emotion)
            .unwrap_or_default(),
        keywords: response.keywords,
        concepts: response.concepts,
    })
}

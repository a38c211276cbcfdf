//! # Page Router
//!
//! Turns one user interaction into the blocks of the selected page:
//! 1. Emit the page header and its input widgets
//! 2. If the page's button was pressed, run the query
//! 3. Append the result, a warning, or an error
//!
//! Every call starts from scratch; the router keeps no per-page state.

use std::sync::Arc;

use data_loader::ArtifactContext;
use recommender::{SimilarProducts, top_similar_products};
use segmentation::{RfmInput, predict_segment};
use tracing::{info, warn};

use crate::blocks::Block;
use crate::pages::{MAX_TOP_N, MIN_TOP_N, Page, RecommendationForm, SegmentationForm};

/// One evaluation of a page: its inputs and whether the trigger was pressed
#[derive(Debug, Clone, PartialEq)]
pub enum Interaction {
    Home,
    Segmentation {
        form: SegmentationForm,
        submitted: bool,
    },
    Recommendation {
        form: RecommendationForm,
        submitted: bool,
    },
}

impl Interaction {
    pub fn page(&self) -> Page {
        match self {
            Interaction::Home => Page::Home,
            Interaction::Segmentation { .. } => Page::CustomerSegmentation,
            Interaction::Recommendation { .. } => Page::ProductRecommendation,
        }
    }

    /// A fresh, unsubmitted visit with default inputs
    pub fn visit(page: Page) -> Self {
        match page {
            Page::Home => Interaction::Home,
            Page::CustomerSegmentation => Interaction::Segmentation {
                form: SegmentationForm::default(),
                submitted: false,
            },
            Page::ProductRecommendation => Interaction::Recommendation {
                form: RecommendationForm::default(),
                submitted: false,
            },
        }
    }
}

/// The dashboard: shared artifacts plus the page handlers
#[derive(Clone)]
pub struct Dashboard {
    context: Arc<ArtifactContext>,
}

impl Dashboard {
    pub fn new(context: Arc<ArtifactContext>) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &ArtifactContext {
        &self.context
    }

    /// Products offered by the Recommendation page's selector
    pub fn products(&self) -> &[String] {
        self.context.products()
    }

    /// Evaluate one interaction
    pub fn handle(&self, interaction: &Interaction) -> Vec<Block> {
        info!("Rendering page: {}", interaction.page());
        match interaction {
            Interaction::Home => self.home(),
            Interaction::Segmentation { form, submitted } => self.segmentation(form, *submitted),
            Interaction::Recommendation { form, submitted } => {
                self.recommendation(form, *submitted)
            }
        }
    }

    fn home(&self) -> Vec<Block> {
        vec![
            Block::Title("🛒 Shopper's Spectrum Dashboard".to_string()),
            Block::Markdown(
                "Welcome! Use the sidebar to explore segmentation and product recommendation features."
                    .to_string(),
            ),
        ]
    }

    fn segmentation(&self, form: &SegmentationForm, submitted: bool) -> Vec<Block> {
        let mut blocks = vec![
            Block::Title("Customer Segmentation".to_string()),
            Block::Markdown("Enter customer RFM values to predict segment.".to_string()),
            Block::Input {
                label: "Recency (days since last purchase)".to_string(),
                value: form.recency.to_string(),
            },
            Block::Input {
                label: "Frequency (number of purchases)".to_string(),
                value: form.frequency.to_string(),
            },
            Block::Input {
                label: "Monetary (total spend)".to_string(),
                value: format!("{:.2}", form.monetary),
            },
        ];

        if !submitted {
            return blocks;
        }

        let prediction = RfmInput::new(form.recency, form.frequency, form.monetary)
            .and_then(|input| predict_segment(&self.context, &input));

        match prediction {
            Ok(prediction) => {
                blocks.push(Block::Success(format!("Cluster No: {}", prediction.cluster_id)));
                blocks.push(Block::Markdown(format!(
                    "This customer belongs to: **{}**",
                    prediction.segment
                )));
            }
            Err(e) => {
                warn!("Segment prediction failed: {}", e);
                blocks.push(Block::Error(e.to_string()));
            }
        }
        blocks
    }

    fn recommendation(&self, form: &RecommendationForm, submitted: bool) -> Vec<Block> {
        let mut blocks = vec![
            Block::Title("Product Recommendation".to_string()),
            Block::Markdown(
                "Select a product to get similar product recommendations based on Collaborative Filtering."
                    .to_string(),
            ),
        ];

        let selected = form
            .product
            .clone()
            .or_else(|| self.products().first().cloned());
        let Some(selected) = selected else {
            blocks.push(Block::Warning("No products available.".to_string()));
            return blocks;
        };

        blocks.push(Block::Selection {
            label: "Select a Product".to_string(),
            selected: selected.clone(),
            options: self.products().len(),
        });
        blocks.push(Block::Input {
            label: "Number of Recommendations".to_string(),
            value: form.top_n.to_string(),
        });

        if !submitted {
            return blocks;
        }

        if !form.top_n_in_range() {
            blocks.push(Block::Error(format!(
                "Number of Recommendations must be between {} and {}",
                MIN_TOP_N, MAX_TOP_N
            )));
            return blocks;
        }

        match top_similar_products(self.context.item_similarity(), &selected, form.top_n) {
            SimilarProducts::NotFound => {
                blocks.push(Block::Warning(
                    "Selected product not found in similarity data.".to_string(),
                ));
            }
            SimilarProducts::Ranked(items) => {
                blocks.push(Block::Subheader(format!(
                    "Top {} products similar to '{}':",
                    form.top_n, selected
                )));
                for (rank, item) in items.iter().enumerate() {
                    blocks.push(Block::Text(format!(
                        "{}. {} (similarity {:.3})",
                        rank + 1,
                        item.product,
                        item.score
                    )));
                }
            }
        }
        blocks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::{
        ItemSimilarity, KMeansModel, StandardScaler, UserItemMatrix, UserSimilarity,
    };

    fn products() -> Vec<String> {
        ["MUG", "TEAPOT", "SAUCER", "CANDLE"]
            .iter()
            .map(|p| p.to_string())
            .collect()
    }

    fn create_test_dashboard() -> Dashboard {
        let item_products: Vec<String> = products()[..3].to_vec();
        let context = ArtifactContext::new(
            KMeansModel::new(vec![
                vec![0.0, 0.0, 0.0, 99999.0],
                vec![1000.0, 1000.0, 1_000_000.0, 99999.0],
            ])
            .unwrap(),
            StandardScaler::new(None, None).unwrap(),
            UserItemMatrix::from_rows(vec![1, 2], products(), vec![vec![1.0; 4], vec![0.0; 4]])
                .unwrap(),
            UserSimilarity::from_rows(vec![1, 2], vec![1, 2], vec![vec![1.0, 0.3], vec![0.3, 1.0]])
                .unwrap(),
            // CANDLE has no similarity data
            ItemSimilarity::from_rows(
                item_products.clone(),
                item_products,
                vec![
                    vec![1.0, 0.8, 0.6],
                    vec![0.8, 1.0, 0.4],
                    vec![0.6, 0.4, 1.0],
                ],
            )
            .unwrap(),
        );
        Dashboard::new(Arc::new(context))
    }

    #[test]
    fn test_home_page() {
        let blocks = create_test_dashboard().handle(&Interaction::Home);
        assert_eq!(blocks.len(), 2);
        assert!(matches!(&blocks[0], Block::Title(t) if t.contains("Shopper's Spectrum")));
    }

    #[test]
    fn test_segmentation_without_submit_shows_inputs_only() {
        let dashboard = create_test_dashboard();
        let blocks = dashboard.handle(&Interaction::visit(Page::CustomerSegmentation));
        assert!(blocks.iter().all(|b| !matches!(b, Block::Success(_))));
        assert!(blocks.contains(&Block::Input {
            label: "Recency (days since last purchase)".to_string(),
            value: "325".to_string(),
        }));
    }

    #[test]
    fn test_segmentation_submit() {
        let dashboard = create_test_dashboard();
        let blocks = dashboard.handle(&Interaction::Segmentation {
            form: SegmentationForm::default(),
            submitted: true,
        });
        // 765322 spend sits closest to the second center
        assert!(blocks.contains(&Block::Success("Cluster No: 1".to_string())));
        assert!(blocks.contains(&Block::Markdown(
            "This customer belongs to: **Occasional Customer**".to_string()
        )));
    }

    #[test]
    fn test_segmentation_invalid_input() {
        let dashboard = create_test_dashboard();
        let blocks = dashboard.handle(&Interaction::Segmentation {
            form: SegmentationForm {
                recency: -5.0,
                ..SegmentationForm::default()
            },
            submitted: true,
        });
        assert!(matches!(blocks.last(), Some(Block::Error(msg)) if msg.contains("recency")));
    }

    #[test]
    fn test_recommendation_defaults_to_first_product() {
        let dashboard = create_test_dashboard();
        let blocks = dashboard.handle(&Interaction::visit(Page::ProductRecommendation));
        assert!(blocks.contains(&Block::Selection {
            label: "Select a Product".to_string(),
            selected: "MUG".to_string(),
            options: 4,
        }));
    }

    #[test]
    fn test_recommendation_submit() {
        let dashboard = create_test_dashboard();
        let blocks = dashboard.handle(&Interaction::Recommendation {
            form: RecommendationForm {
                product: Some("TEAPOT".to_string()),
                top_n: 3,
            },
            submitted: true,
        });

        let lines: Vec<&str> = blocks
            .iter()
            .filter_map(|b| match b {
                Block::Text(t) => Some(t.as_str()),
                _ => None,
            })
            .collect();
        assert!(blocks.contains(&Block::Subheader(
            "Top 3 products similar to 'TEAPOT':".to_string()
        )));
        assert_eq!(
            lines,
            vec!["1. MUG (similarity 0.800)", "2. SAUCER (similarity 0.400)"]
        );
    }

    #[test]
    fn test_recommendation_not_found_warning() {
        let dashboard = create_test_dashboard();
        let blocks = dashboard.handle(&Interaction::Recommendation {
            form: RecommendationForm {
                product: Some("CANDLE".to_string()),
                top_n: 5,
            },
            submitted: true,
        });
        assert_eq!(
            blocks.last(),
            Some(&Block::Warning(
                "Selected product not found in similarity data.".to_string()
            ))
        );
        assert!(!blocks.iter().any(|b| matches!(b, Block::Subheader(_))));
    }

    #[test]
    fn test_recommendation_top_n_out_of_range() {
        let dashboard = create_test_dashboard();
        let blocks = dashboard.handle(&Interaction::Recommendation {
            form: RecommendationForm {
                product: Some("MUG".to_string()),
                top_n: 20,
            },
            submitted: true,
        });
        assert!(matches!(blocks.last(), Some(Block::Error(_))));
    }
}

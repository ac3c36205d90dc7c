//! Matching slide content against the layout catalog.

use super::{Layout, LayoutCatalog, Role};
use crate::common::{Error, Result};
use std::fmt;
use tracing::debug;

/// What a slide needs from a layout.
///
/// Derived from slide content; a channel only counts when it holds at least
/// one paragraph of text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ContentRequirement {
    pub title: bool,
    pub exhibits: usize,
    pub main: bool,
    pub margin: bool,
    pub footnotes: bool,
}

impl ContentRequirement {
    /// Minimum number of placeholders of a role a hosting layout must offer.
    pub fn needed(&self, role: Role) -> usize {
        match role {
            Role::Title => usize::from(self.title),
            Role::Picture => self.exhibits,
            Role::Main => usize::from(self.main),
            Role::Margin => usize::from(self.margin),
            Role::Footer => usize::from(self.footnotes),
            Role::Subtitle | Role::Date | Role::SlideNum | Role::Table => 0,
        }
    }

    /// Whether a layout offers enough placeholders for every required role.
    pub fn is_satisfied_by(&self, layout: &Layout) -> bool {
        Role::ALL
            .into_iter()
            .all(|role| layout.count(role) >= self.needed(role))
    }

    /// Roles the layout cannot host in sufficient number.
    pub fn unmet_roles(&self, layout: &Layout) -> Vec<Role> {
        Role::ALL
            .into_iter()
            .filter(|&role| layout.count(role) < self.needed(role))
            .collect()
    }

    /// Whether the slide needs nothing at all.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl fmt::Display for ContentRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if self.title {
            parts.push("title".to_string());
        }
        if self.exhibits > 0 {
            parts.push(format!("{} picture(s)", self.exhibits));
        }
        if self.main {
            parts.push("main text".to_string());
        }
        if self.margin {
            parts.push("margin text".to_string());
        }
        if self.footnotes {
            parts.push("footer".to_string());
        }
        if parts.is_empty() {
            f.write_str("no content")
        } else {
            f.write_str(&parts.join(", "))
        }
    }
}

/// Outcome of a layout search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Qualifying layout indices in ascending order; never empty.
    Candidates(Vec<usize>),
    /// Nothing qualifies. `examined` is the catalog size, so zero means the
    /// catalog had no layouts at all.
    NoMatch {
        requirement: ContentRequirement,
        examined: usize,
    },
}

impl Resolution {
    /// The default choice: the first qualifying layout.
    pub fn canonical(&self) -> Option<usize> {
        match self {
            Resolution::Candidates(indices) => indices.first().copied(),
            Resolution::NoMatch { .. } => None,
        }
    }

    /// Every qualifying layout index (empty on failure).
    pub fn candidates(&self) -> &[usize] {
        match self {
            Resolution::Candidates(indices) => indices,
            Resolution::NoMatch { .. } => &[],
        }
    }

    #[inline]
    pub fn is_match(&self) -> bool {
        matches!(self, Resolution::Candidates(_))
    }

    /// The canonical layout, or `LayoutNotFound` when nothing qualifies.
    pub fn into_layout(self) -> Result<usize> {
        match self {
            Resolution::Candidates(indices) => indices
                .first()
                .copied()
                .ok_or_else(|| Error::LayoutNotFound("empty candidate list".to_string())),
            Resolution::NoMatch {
                requirement,
                examined: 0,
            } => Err(Error::LayoutNotFound(format!(
                "catalog has no layouts (slide needs {})",
                requirement
            ))),
            Resolution::NoMatch {
                requirement,
                examined,
            } => Err(Error::LayoutNotFound(format!(
                "none of {} layouts can host {}",
                examined, requirement
            ))),
        }
    }
}

/// Find every layout able to host the requirement, in catalog order.
pub fn resolve(requirement: &ContentRequirement, catalog: &LayoutCatalog) -> Resolution {
    let candidates: Vec<usize> = catalog
        .iter()
        .filter(|layout| requirement.is_satisfied_by(layout))
        .map(Layout::index)
        .collect();

    debug!(
        %requirement,
        examined = catalog.len(),
        matched = candidates.len(),
        "resolved layouts"
    );

    if candidates.is_empty() {
        Resolution::NoMatch {
            requirement: *requirement,
            examined: catalog.len(),
        }
    } else {
        Resolution::Candidates(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> LayoutCatalog {
        LayoutCatalog::new(vec![
            Layout::new("Title").with_placeholder("Title 1", 0),
            Layout::new("Title and Text")
                .with_placeholder("Title 1", 0)
                .with_placeholder("Main Text", 1)
                .with_placeholder("Footer", 11),
            Layout::new("Two Pictures")
                .with_placeholder("Title 1", 0)
                .with_placeholder("Pic A", 13)
                .with_placeholder("Pic B", 14)
                .with_placeholder("Margin", 2)
                .with_placeholder("Footer", 11),
            Layout::new("Everything")
                .with_placeholder("Title 1", 0)
                .with_placeholder("Main Text", 1)
                .with_placeholder("Margin", 2)
                .with_placeholder("Pic A", 13)
                .with_placeholder("Footer", 11),
        ])
    }

    #[test]
    fn test_title_only_matches_all_titled() {
        let req = ContentRequirement {
            title: true,
            ..Default::default()
        };
        let res = resolve(&req, &catalog());
        assert_eq!(res.candidates(), &[0, 1, 2, 3]);
        assert_eq!(res.canonical(), Some(0));
    }

    #[test]
    fn test_main_and_footer() {
        let req = ContentRequirement {
            title: true,
            main: true,
            footnotes: true,
            ..Default::default()
        };
        assert_eq!(resolve(&req, &catalog()), Resolution::Candidates(vec![1, 3]));
    }

    #[test]
    fn test_picture_count_is_a_minimum() {
        let req = ContentRequirement {
            exhibits: 2,
            ..Default::default()
        };
        assert_eq!(resolve(&req, &catalog()).candidates(), &[2]);

        let req = ContentRequirement {
            exhibits: 1,
            ..Default::default()
        };
        assert_eq!(resolve(&req, &catalog()).candidates(), &[2, 3]);
    }

    #[test]
    fn test_three_pictures_fail() {
        let req = ContentRequirement {
            exhibits: 3,
            ..Default::default()
        };
        let res = resolve(&req, &catalog());
        assert!(!res.is_match());
        assert_eq!(res.canonical(), None);
        assert!(res.candidates().is_empty());
        match res.into_layout() {
            Err(Error::LayoutNotFound(msg)) => {
                assert!(msg.contains("none of 4 layouts"));
                assert!(msg.contains("3 picture(s)"));
            },
            other => panic!("Unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_empty_catalog_is_distinguishable() {
        let req = ContentRequirement::default();
        let res = resolve(&req, &LayoutCatalog::default());
        assert_eq!(
            res,
            Resolution::NoMatch {
                requirement: req,
                examined: 0
            }
        );
        match res.into_layout() {
            Err(Error::LayoutNotFound(msg)) => assert!(msg.contains("no layouts")),
            other => panic!("Unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_empty_requirement_matches_everything() {
        let req = ContentRequirement::default();
        assert!(req.is_empty());
        assert_eq!(resolve(&req, &catalog()).candidates(), &[0, 1, 2, 3]);
        assert_eq!(req.to_string(), "no content");
    }

    #[test]
    fn test_unmet_roles() {
        let req = ContentRequirement {
            title: true,
            exhibits: 2,
            main: true,
            margin: false,
            footnotes: true,
        };
        let cat = catalog();
        let first = cat.get(0).expect("layout 0");
        assert_eq!(
            req.unmet_roles(first),
            vec![Role::Main, Role::Footer, Role::Picture]
        );
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn layout_strategy() -> impl Strategy<Value = Layout> {
            prop::collection::vec((0usize..9, 0u32..40), 0..8).prop_map(|slots| {
                let mut layout = Layout::new("generated");
                for (n, (role, idx)) in slots.into_iter().enumerate() {
                    let prefix = Role::ALL[role].name_prefix();
                    layout.insert_placeholder(format!("{} {}", prefix, n), idx);
                }
                layout
            })
        }

        fn requirement_strategy() -> impl Strategy<Value = ContentRequirement> {
            (any::<bool>(), 0usize..4, any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
                |(title, exhibits, main, margin, footnotes)| ContentRequirement {
                    title,
                    exhibits,
                    main,
                    margin,
                    footnotes,
                },
            )
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(200))]

            #[test]
            fn prop_candidates_partition_catalog(
                layouts in prop::collection::vec(layout_strategy(), 0..6),
                req in requirement_strategy(),
            ) {
                let catalog = LayoutCatalog::new(layouts);
                let res = resolve(&req, &catalog);
                let picked = res.candidates().to_vec();

                for layout in &catalog {
                    let ok = Role::ALL.iter().all(|&r| layout.count(r) >= req.needed(r));
                    prop_assert_eq!(picked.contains(&layout.index()), ok);
                }
                prop_assert!(picked.windows(2).all(|w| w[0] < w[1]));
                prop_assert_eq!(res.is_match(), !picked.is_empty());
            }

            #[test]
            fn prop_resolve_is_deterministic(
                layouts in prop::collection::vec(layout_strategy(), 0..6),
                req in requirement_strategy(),
            ) {
                let catalog = LayoutCatalog::new(layouts);
                prop_assert_eq!(resolve(&req, &catalog), resolve(&req, &catalog));
            }
        }
    }
}

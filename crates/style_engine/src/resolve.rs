//! The cascade driver: gather matching declarations for one element, order them and
//! apply them to a fresh style.

use crate::adjuster::{AdjustTarget, StyleAdjuster};
use crate::properties::apply_declaration;
use crate::style_value::StyleValue;
use css_cascade::{CascadeIndex, DeclaredProperty, PriorityKey, Source};
use css_selectors::{
    ElementAdapter, MatchState, MatchStateCache, MatchingContext, PseudoId, QuirksMode,
    Specificity, match_selector,
};
use log::debug;
use smallvec::SmallVec;
use tracing::trace_span;

/// A document the resolver can style. Besides the tree queries of
/// [`ElementAdapter`] it supplies declarations that do not come from sheets.
pub trait StyledDocument: ElementAdapter {
    /// Declarations from the element's `style` attribute.
    fn inline_declarations(&self, _element: Self::Handle) -> &[DeclaredProperty] {
        &[]
    }

    /// Extra presentational declarations, e.g. styling shared by all cells of a table.
    /// They rank as non-CSS hints.
    fn additional_declarations(&self, _element: Self::Handle) -> &[DeclaredProperty] {
        &[]
    }
}

/// One declaration waiting to be applied.
#[derive(Clone, Copy, Debug)]
struct CascadeEntry<'decl> {
    key: PriorityKey,
    declaration: &'decl DeclaredProperty,
    pseudo: Option<PseudoId>,
}

type MainBuffer<'decl> = SmallVec<CascadeEntry<'decl>, 32>;
type PseudoBuffer<'decl> = SmallVec<CascadeEntry<'decl>, 4>;

/// Resolve the computed style of `element`.
///
/// `parent` is the parent's resolved style, or `None` at the root. Declarations whose
/// value does not fit their property are skipped.
pub fn resolve_style<D: StyledDocument>(
    document: &D,
    element: D::Handle,
    parent: Option<&StyleValue>,
    index: &CascadeIndex,
) -> StyleValue {
    let _span = trace_span!("resolve_style").entered();
    let quirks = document.quirks_mode();
    let tag = document.tag_name(element).to_ascii_lowercase();

    let mut style = parent.map_or_else(StyleValue::root, StyleValue::inherit_from);
    let mut cache = MatchStateCache::with_len(index.selector_count());
    let mut context = MatchingContext::new();
    let mut main: MainBuffer<'_> = SmallVec::new();
    let mut pseudo: PseudoBuffer<'_> = SmallVec::new();

    for selector_id in index.candidates(&tag) {
        let Some(selector) = index.selector(selector_id) else {
            continue;
        };
        let state = cache.get_or_insert_with(selector_id as usize, || {
            match_selector(document, element, selector, &mut context)
        });
        let target = match state {
            MatchState::Applies => None,
            MatchState::AppliesPseudo(pseudo_id) => Some(pseudo_id),
            MatchState::Unknown | MatchState::Invalid => continue,
        };
        for (_, ordered) in index.properties_for(selector_id) {
            let entry = CascadeEntry {
                key: ordered.key,
                declaration: &ordered.declaration,
                pseudo: target,
            };
            if target.is_some() {
                pseudo.push(entry);
            } else {
                main.push(entry);
            }
        }
    }

    append_local_declarations(document, element, index, &mut main);

    main.sort_by_key(|entry| entry.key);
    pseudo.sort_by_key(|entry| (entry.pseudo, entry.key));

    apply_entries(&mut style, parent, &main, quirks);
    style.add_state_dependencies(context.dependencies);

    let adjuster = StyleAdjuster::new(quirks);
    adjuster.adjust(&mut style, parent, Some(AdjustTarget { tag: &tag }));

    resolve_pseudo_styles(&mut style, &pseudo, adjuster, quirks);
    style
}

/// Additional declarations, then inline ones, all positioned after every sheet entry.
fn append_local_declarations<'decl, D: StyledDocument>(
    document: &'decl D,
    element: D::Handle,
    index: &CascadeIndex,
    main: &mut MainBuffer<'decl>,
) {
    let mut position = u32::try_from(index.property_count()).unwrap_or(u32::MAX);
    let additional = document
        .additional_declarations(element)
        .iter()
        .map(|declaration| (declaration, Source::NonCssHint));
    let inline = document.inline_declarations(element).iter().map(|declaration| {
        (
            declaration,
            Source::inline(declaration.important, declaration.non_css_hint),
        )
    });
    for (declaration, source) in additional.chain(inline) {
        main.push(CascadeEntry {
            key: PriorityKey::new(declaration.id, source, Specificity::default(), position),
            declaration,
            pseudo: None,
        });
        position = position.saturating_add(1);
    }
}

fn apply_entries(
    style: &mut StyleValue,
    parent: Option<&StyleValue>,
    entries: &[CascadeEntry<'_>],
    quirks: QuirksMode,
) {
    for entry in entries {
        if let Err(err) = apply_declaration(style, parent, entry.declaration, quirks) {
            debug!("skipping declaration: {err:#}");
        }
    }
}

/// Build one pseudo-style per pseudo id present in the (grouped) buffer.
fn resolve_pseudo_styles(
    style: &mut StyleValue,
    entries: &[CascadeEntry<'_>],
    adjuster: StyleAdjuster,
    quirks: QuirksMode,
) {
    for group in entries.chunk_by(|left, right| left.pseudo == right.pseudo) {
        let Some(pseudo_id) = group.first().and_then(|entry| entry.pseudo) else {
            continue;
        };
        let owner: &StyleValue = style;
        let mut pseudo_style = StyleValue::inherit_from(owner);
        apply_entries(&mut pseudo_style, Some(owner), group, quirks);
        adjuster.adjust(&mut pseudo_style, Some(owner), None);
        style.set_pseudo_style(pseudo_id, pseudo_style);
    }
}

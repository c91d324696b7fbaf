//! Three-tier inference: checker, then annotation, then `false`.
//!
//! Each tier answers [`Inference::Known`] or [`Inference::Unknown`]; an
//! unknown answer, a service error, or a panic inside a tier moves on to the
//! next tier. The final answer is memoized in the session's
//! [`InferenceCache`].

use crate::cache::{InferenceCache, InferenceKind};
use crate::service::{TypeFlags, TypeId, TypeService, TypeServiceError};
use lintel_syntax::{NodeId, NodeKind, SyntaxTree, TsKeyword};
use rustc_hash::FxHashSet;
use std::panic::{self, AssertUnwindSafe};
use tracing::trace;

/// Type names that denote a renderable UI node rather than a component.
const UI_NODE_TYPE_NAMES: &[&str] = &["ReactNode", "ReactElement", "React.ReactNode", "JSX.Element"];

/// The outcome of one inference tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Inference {
    /// The tier settled the question.
    Known(bool),
    /// The tier has no opinion; try the next one.
    Unknown,
}

/// Returns `true` if `name` is one of the recognized UI-node type names.
pub fn is_ui_node_type_name(name: &str) -> bool {
    UI_NODE_TYPE_NAMES.contains(&name)
}

/// Returns `true` if the node is boolean-typed.
pub fn infer_booleanness(
    tree: &SyntaxTree,
    node: NodeId,
    types: Option<&dyn TypeService>,
    cache: &mut InferenceCache,
) -> bool {
    infer(tree, node, types, cache, InferenceKind::Boolean)
}

/// Returns `true` if the node is typed as a UI node (`ReactNode` and friends).
pub fn infer_ui_nodeness(
    tree: &SyntaxTree,
    node: NodeId,
    types: Option<&dyn TypeService>,
    cache: &mut InferenceCache,
) -> bool {
    infer(tree, node, types, cache, InferenceKind::UiNode)
}

fn infer(
    tree: &SyntaxTree,
    node: NodeId,
    types: Option<&dyn TypeService>,
    cache: &mut InferenceCache,
    kind: InferenceKind,
) -> bool {
    if let Some(hit) = cache.get(node, kind) {
        return hit;
    }

    let mut verdict = Inference::Unknown;
    if let Some(service) = types {
        verdict = guarded("checker", node, || match kind {
            InferenceKind::Boolean => checker_boolean(service, node),
            InferenceKind::UiNode => checker_ui_node(service, node),
        });
    }
    if verdict == Inference::Unknown {
        verdict = guarded("annotation", node, || {
            Ok(match kind {
                InferenceKind::Boolean => annotation_boolean(tree, node),
                InferenceKind::UiNode => annotation_ui_node(tree, node),
            })
        });
    }

    let value = match verdict {
        Inference::Known(value) => value,
        Inference::Unknown => {
            trace!(node = node.as_raw(), ?kind, "no tier could infer; assuming false");
            false
        }
    };
    cache.insert(node, kind, value)
}

fn guarded<F>(tier: &'static str, node: NodeId, f: F) -> Inference
where
    F: FnOnce() -> Result<Inference, TypeServiceError>,
{
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(inference)) => inference,
        Ok(Err(err)) => {
            trace!(tier, node = node.as_raw(), %err, "inference tier failed");
            Inference::Unknown
        }
        Err(_) => {
            trace!(tier, node = node.as_raw(), "inference tier panicked");
            Inference::Unknown
        }
    }
}

fn checker_boolean(service: &dyn TypeService, node: NodeId) -> Result<Inference, TypeServiceError> {
    let Some(ty) = service.type_of(node)? else {
        return Ok(Inference::Unknown);
    };
    let flags = service.flags(ty)?;
    if flags.is_opaque() {
        return Ok(Inference::Unknown);
    }
    Ok(Inference::Known(
        flags.intersects(TypeFlags::BOOLEAN | TypeFlags::BOOLEAN_LITERAL),
    ))
}

fn checker_ui_node(service: &dyn TypeService, node: NodeId) -> Result<Inference, TypeServiceError> {
    let Some(ty) = service.type_of(node)? else {
        return Ok(Inference::Unknown);
    };
    if service.flags(ty)?.is_opaque() {
        return Ok(Inference::Unknown);
    }
    let mut visited = FxHashSet::default();
    Ok(Inference::Known(resolved_is_ui_node(service, ty, &mut visited)?))
}

fn resolved_is_ui_node(
    service: &dyn TypeService,
    ty: TypeId,
    visited: &mut FxHashSet<TypeId>,
) -> Result<bool, TypeServiceError> {
    if !visited.insert(ty) {
        return Ok(false);
    }
    if let Some(name) = service.symbol_name(ty)? {
        if is_ui_node_type_name(&name) {
            return Ok(true);
        }
    }
    if service
        .flags(ty)?
        .intersects(TypeFlags::UNION | TypeFlags::INTERSECTION)
    {
        for member in service.members(ty)? {
            if resolved_is_ui_node(service, member, visited)? {
                return Ok(true);
            }
        }
    }
    Ok(false)
}

/// Returns the syntactic type annotation that applies to `node`, if any.
///
/// Understands identifiers and object patterns with their own annotation,
/// declarators (through their binding), defaulted bindings, property
/// signatures, and shorthand properties destructured out of an annotated
/// object pattern (`{ icon }: { icon: ReactNode }`).
pub fn annotation_of(tree: &SyntaxTree, node: NodeId) -> Option<NodeId> {
    match tree.kind(node) {
        NodeKind::Identifier {
            type_annotation: Some(ann),
            ..
        }
        | NodeKind::ObjectPattern {
            type_annotation: Some(ann),
            ..
        } => Some(*ann),
        NodeKind::TsPropertySignature { annotation, .. } => *annotation,
        NodeKind::VariableDeclarator { id, .. } => annotation_of(tree, *id),
        NodeKind::AssignmentPattern { left, .. } => annotation_of(tree, *left),
        NodeKind::Identifier { name, .. } => destructured_annotation(tree, node, name),
        _ => None,
    }
}

fn destructured_annotation(tree: &SyntaxTree, ident: NodeId, name: &str) -> Option<NodeId> {
    let mut prop = tree.parent(ident)?;
    if matches!(tree.kind(prop), NodeKind::AssignmentPattern { .. }) {
        prop = tree.parent(prop)?;
    }
    if !matches!(tree.kind(prop), NodeKind::Property { .. }) {
        return None;
    }
    let pattern = tree.parent(prop)?;
    let NodeKind::ObjectPattern {
        type_annotation: Some(ann),
        ..
    } = tree.kind(pattern)
    else {
        return None;
    };
    let NodeKind::TsTypeLiteral { members } = tree.kind(*ann) else {
        return None;
    };
    members.iter().find_map(|m| match tree.kind(*m) {
        NodeKind::TsPropertySignature {
            key,
            annotation: Some(a),
            ..
        } if key == name => Some(*a),
        _ => None,
    })
}

fn annotation_boolean(tree: &SyntaxTree, node: NodeId) -> Inference {
    match annotation_of(tree, node) {
        Some(ann) => Inference::Known(matches!(
            tree.kind(ann),
            NodeKind::TsKeyword(TsKeyword::Boolean)
        )),
        None => Inference::Unknown,
    }
}

fn annotation_ui_node(tree: &SyntaxTree, node: NodeId) -> Inference {
    match annotation_of(tree, node) {
        Some(ann) => Inference::Known(annotated_is_ui_node(tree, ann)),
        None => Inference::Unknown,
    }
}

fn annotated_is_ui_node(tree: &SyntaxTree, ann: NodeId) -> bool {
    match tree.kind(ann) {
        NodeKind::TsTypeReference { name, .. } => is_ui_node_type_name(&name.join(".")),
        NodeKind::TsUnionType { types } | NodeKind::TsIntersectionType { types } => {
            types.iter().any(|t| annotated_is_ui_node(tree, *t))
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::TypeTable;
    use lintel_syntax::TreeBuilder;
    use rstest::rstest;

    struct Failing;

    impl TypeService for Failing {
        fn type_of(&self, _: NodeId) -> Result<Option<TypeId>, TypeServiceError> {
            Err(TypeServiceError::Unavailable("offline".into()))
        }
        fn flags(&self, _: TypeId) -> Result<TypeFlags, TypeServiceError> {
            unreachable!()
        }
        fn symbol_name(&self, _: TypeId) -> Result<Option<String>, TypeServiceError> {
            unreachable!()
        }
        fn members(&self, _: TypeId) -> Result<Vec<TypeId>, TypeServiceError> {
            unreachable!()
        }
    }

    struct Panicking;

    impl TypeService for Panicking {
        fn type_of(&self, _: NodeId) -> Result<Option<TypeId>, TypeServiceError> {
            panic!("checker crashed")
        }
        fn flags(&self, _: TypeId) -> Result<TypeFlags, TypeServiceError> {
            unreachable!()
        }
        fn symbol_name(&self, _: TypeId) -> Result<Option<String>, TypeServiceError> {
            unreachable!()
        }
        fn members(&self, _: TypeId) -> Result<Vec<TypeId>, TypeServiceError> {
            unreachable!()
        }
    }

    /// `const <name>: boolean = x;` and returns (tree, binding ident).
    fn annotated_bool(name: &str) -> (SyntaxTree, NodeId) {
        let mut b = TreeBuilder::new("a.ts");
        let ann = b.ts_keyword(TsKeyword::Boolean);
        let id = b.typed_ident(name, ann);
        let init = b.ident("x");
        let decl = b.const_decl(id, init);
        let program = b.program(&[decl]);
        (b.finish(program).tree, id)
    }

    #[test]
    fn annotation_tier_without_checker() {
        let (tree, id) = annotated_bool("enabled");
        let mut cache = InferenceCache::new();
        assert!(infer_booleanness(&tree, id, None, &mut cache));
        assert!(!infer_ui_nodeness(&tree, id, None, &mut cache));
    }

    #[test]
    fn unannotated_defaults_to_false() {
        let mut b = TreeBuilder::new("a.ts");
        let id = b.ident("flag");
        let t = b.boolean(true);
        let decl = b.const_decl(id, t);
        let program = b.program(&[decl]);
        let tree = b.finish(program).tree;
        let mut cache = InferenceCache::new();
        assert!(!infer_booleanness(&tree, id, None, &mut cache));
    }

    #[test]
    fn checker_overrides_annotation() {
        let (tree, id) = annotated_bool("enabled");
        let mut table = TypeTable::new();
        let s = table.add(TypeFlags::STRING, Some("string"));
        table.bind(id, s);
        let mut cache = InferenceCache::new();
        assert!(!infer_booleanness(&tree, id, Some(&table), &mut cache));
    }

    #[test]
    fn opaque_checker_type_falls_back_to_annotation() {
        let (tree, id) = annotated_bool("enabled");
        let mut table = TypeTable::new();
        let any = table.add(TypeFlags::ANY, None);
        table.bind(id, any);
        let mut cache = InferenceCache::new();
        assert!(infer_booleanness(&tree, id, Some(&table), &mut cache));
    }

    #[rstest]
    #[case::error(&Failing as &dyn TypeService)]
    #[case::panic(&Panicking as &dyn TypeService)]
    fn faulty_checker_degrades(#[case] service: &dyn TypeService) {
        let (tree, id) = annotated_bool("enabled");
        let mut cache = InferenceCache::new();
        assert!(infer_booleanness(&tree, id, Some(service), &mut cache));
    }

    #[test]
    fn cache_short_circuits() {
        let (tree, id) = annotated_bool("enabled");
        let mut cache = InferenceCache::new();
        cache.insert(id, InferenceKind::Boolean, false);
        assert!(!infer_booleanness(&tree, id, None, &mut cache));
    }

    #[rstest]
    #[case("ReactNode", true)]
    #[case("React.ReactNode", true)]
    #[case("JSX.Element", true)]
    #[case("ReactElement", true)]
    #[case("ComponentType", false)]
    fn annotation_ui_names(#[case] name: &str, #[case] expected: bool) {
        let mut b = TreeBuilder::new("a.tsx");
        let ann = b.ts_ref(name);
        let id = b.typed_ident("icon", ann);
        let body = b.block(&[]);
        let f = b.function_decl("Card", &[id], body);
        let program = b.program(&[f]);
        let tree = b.finish(program).tree;
        let mut cache = InferenceCache::new();
        assert_eq!(infer_ui_nodeness(&tree, id, None, &mut cache), expected);
    }

    #[test]
    fn destructured_prop_uses_type_literal_member() {
        let mut b = TreeBuilder::new("a.tsx");
        let node_ty = b.ts_ref("ReactNode");
        let undef = b.ts_keyword(TsKeyword::Undefined);
        let union = b.ts_union(&[node_ty, undef]);
        let sig = b.ts_prop("icon", union, true);
        let lit = b.ts_type_literal(&[sig]);
        let prop = b.shorthand_prop("icon");
        let pattern = b.object_pattern(&[prop], Some(lit));
        let body = b.block(&[]);
        let f = b.function_decl("Card", &[pattern], body);
        let program = b.program(&[f]);
        let built = b.finish(program);
        let NodeKind::Property { key, .. } = built.tree.kind(prop) else {
            panic!("expected property");
        };
        let mut cache = InferenceCache::new();
        assert!(infer_ui_nodeness(&built.tree, *key, None, &mut cache));
    }

    #[test]
    fn checker_recurses_through_cyclic_unions() {
        let (tree, id) = annotated_bool("content");
        let mut table = TypeTable::new();
        let s = table.add(TypeFlags::STRING, Some("string"));
        let outer = table.union(&[s]);
        let inner = table.union(&[outer]);
        table.set_members(outer, &[s, inner]).unwrap();
        table.bind(id, outer);
        let mut cache = InferenceCache::new();
        assert!(!infer_ui_nodeness(&tree, id, Some(&table), &mut cache));

        let element = table.named("JSX.Element");
        table.set_members(inner, &[outer, element]).unwrap();
        let mut cache = InferenceCache::new();
        assert!(infer_ui_nodeness(&tree, id, Some(&table), &mut cache));
    }
}

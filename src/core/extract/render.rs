//! Render TypeScript type annotations and heritage expressions as text.

use swc_ecma_ast::{
    Expr, MemberProp, Pat, TsEntityName, TsExprWithTypeArgs, TsFnOrConstructorType, TsFnParam,
    TsKeywordTypeKind, TsLit, TsType, TsTypeAnn, TsTypeOperatorOp, TsTypeParamInstantiation,
    TsUnionOrIntersectionType,
};

const FALLBACK: &str = "any";

pub fn render_type_ann(ann: &TsTypeAnn) -> String {
    render_type(&ann.type_ann)
}

pub fn render_type(ty: &TsType) -> String {
    match ty {
        TsType::TsKeywordType(keyword) => keyword_name(keyword.kind).to_string(),
        TsType::TsThisType(_) => "this".to_string(),
        TsType::TsTypeRef(type_ref) => format!(
            "{}{}",
            render_entity_name(&type_ref.type_name),
            render_type_args(type_ref.type_params.as_deref())
        ),
        TsType::TsArrayType(array) => {
            let elem_type = strip_parens(&array.elem_type);
            let elem = render_type(elem_type);
            if matches!(
                elem_type,
                TsType::TsUnionOrIntersectionType(_) | TsType::TsFnOrConstructorType(_)
            ) {
                format!("({elem})[]")
            } else {
                format!("{elem}[]")
            }
        }
        TsType::TsUnionOrIntersectionType(TsUnionOrIntersectionType::TsUnionType(union)) => {
            join_types(&union.types, " | ")
        }
        TsType::TsUnionOrIntersectionType(TsUnionOrIntersectionType::TsIntersectionType(
            intersection,
        )) => join_types(&intersection.types, " & "),
        TsType::TsTupleType(tuple) => format!(
            "[{}]",
            tuple
                .elem_types
                .iter()
                .map(|elem| render_type(&elem.ty))
                .collect::<Vec<_>>()
                .join(", ")
        ),
        TsType::TsLitType(lit) => match &lit.lit {
            TsLit::Number(number) => number
                .raw
                .as_ref()
                .map(|raw| raw.to_string())
                .unwrap_or_else(|| number.value.to_string()),
            TsLit::Str(s) => format!("\"{}\"", s.value.as_str().unwrap_or_default()),
            TsLit::Bool(b) => b.value.to_string(),
            _ => FALLBACK.to_string(),
        },
        TsType::TsFnOrConstructorType(TsFnOrConstructorType::TsFnType(func)) => format!(
            "({}) => {}",
            func.params
                .iter()
                .map(render_fn_param)
                .collect::<Vec<_>>()
                .join(", "),
            render_type_ann(&func.type_ann)
        ),
        TsType::TsParenthesizedType(paren) => render_type(&paren.type_ann),
        TsType::TsTypeOperator(operator) => {
            let inner = render_type(&operator.type_ann);
            match operator.op {
                TsTypeOperatorOp::KeyOf => format!("keyof {inner}"),
                TsTypeOperatorOp::Unique => format!("unique {inner}"),
                _ => format!("readonly {inner}"),
            }
        }
        TsType::TsTypeLit(_) => "object".to_string(),
        _ => FALLBACK.to_string(),
    }
}

fn strip_parens(ty: &TsType) -> &TsType {
    match ty {
        TsType::TsParenthesizedType(paren) => strip_parens(&paren.type_ann),
        other => other,
    }
}

fn keyword_name(kind: TsKeywordTypeKind) -> &'static str {
    match kind {
        TsKeywordTypeKind::TsUnknownKeyword => "unknown",
        TsKeywordTypeKind::TsNumberKeyword => "number",
        TsKeywordTypeKind::TsObjectKeyword => "object",
        TsKeywordTypeKind::TsBooleanKeyword => "boolean",
        TsKeywordTypeKind::TsBigIntKeyword => "bigint",
        TsKeywordTypeKind::TsStringKeyword => "string",
        TsKeywordTypeKind::TsSymbolKeyword => "symbol",
        TsKeywordTypeKind::TsVoidKeyword => "void",
        TsKeywordTypeKind::TsUndefinedKeyword => "undefined",
        TsKeywordTypeKind::TsNullKeyword => "null",
        TsKeywordTypeKind::TsNeverKeyword => "never",
        _ => FALLBACK,
    }
}

fn join_types(types: &[Box<TsType>], separator: &str) -> String {
    types
        .iter()
        .map(|ty| render_type(ty))
        .collect::<Vec<_>>()
        .join(separator)
}

pub fn render_entity_name(name: &TsEntityName) -> String {
    match name {
        TsEntityName::Ident(ident) => ident.sym.to_string(),
        TsEntityName::TsQualifiedName(qualified) => {
            format!("{}.{}", render_entity_name(&qualified.left), qualified.right.sym)
        }
    }
}

/// `<A, B>` or an empty string.
pub fn render_type_args(args: Option<&TsTypeParamInstantiation>) -> String {
    match args {
        Some(args) if !args.params.is_empty() => format!("<{}>", join_types(&args.params, ", ")),
        _ => String::new(),
    }
}

pub fn render_fn_param(param: &TsFnParam) -> String {
    match param {
        TsFnParam::Ident(binding) => {
            let optional = if binding.id.optional { "?" } else { "" };
            match &binding.type_ann {
                Some(ann) => format!("{}{}: {}", binding.id.sym, optional, render_type_ann(ann)),
                None => format!("{}{}", binding.id.sym, optional),
            }
        }
        TsFnParam::Rest(rest) => {
            let name = pat_name(&rest.arg).unwrap_or_else(|| "args".to_string());
            match rest.type_ann.as_deref().or_else(|| pat_type_ann(&rest.arg)) {
                Some(ann) => format!("...{}: {}", name, render_type_ann(ann)),
                None => format!("...{name}"),
            }
        }
        _ => FALLBACK.to_string(),
    }
}

/// Name bound by a simple identifier pattern.
pub fn pat_name(pat: &Pat) -> Option<String> {
    match pat {
        Pat::Ident(binding) => Some(binding.id.sym.to_string()),
        _ => None,
    }
}

/// Type annotation carried by an identifier pattern.
pub fn pat_type_ann(pat: &Pat) -> Option<&TsTypeAnn> {
    match pat {
        Pat::Ident(binding) => binding.type_ann.as_deref(),
        _ => None,
    }
}

/// Text of an `extends`/`implements` target such as `Serenity.Widget`.
pub fn render_heritage_expr(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Ident(ident) => Some(ident.sym.to_string()),
        Expr::Member(member) => {
            let object = render_heritage_expr(&member.obj)?;
            match &member.prop {
                MemberProp::Ident(prop) => Some(format!("{}.{}", object, prop.sym)),
                _ => None,
            }
        }
        Expr::Paren(paren) => render_heritage_expr(&paren.expr),
        _ => None,
    }
}

pub fn render_expr_with_type_args(heritage: &TsExprWithTypeArgs) -> Option<String> {
    let base = render_heritage_expr(&heritage.expr)?;
    Some(format!(
        "{}{}",
        base,
        render_type_args(heritage.type_args.as_deref())
    ))
}

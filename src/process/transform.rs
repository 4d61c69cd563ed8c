//! Declaration output cleanup.

use crate::engine::{DeclarationTransform, PropertyName, PropertySignature};

/// Rewrite `#name` property signatures as `"#name"`.
///
/// Private names are not valid in declaration files. Keying the property
/// with a string literal keeps the member in the output instead of dropping
/// it or failing the emit.
#[derive(Debug, Clone, Copy, Default)]
pub struct StripPrivateFields;

impl DeclarationTransform for StripPrivateFields {
    fn visit_property_signature(&mut self, node: &mut PropertySignature) {
        if let PropertyName::PrivateIdentifier(text) = &mut node.name {
            node.name = PropertyName::StringLiteral(std::mem::take(text));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Block, CustomTransformers, DeclarationFile, Node};

    #[test]
    fn test_private_names_become_string_literals() {
        let private = PropertySignature {
            modifiers: vec!["readonly".into()],
            name: PropertyName::PrivateIdentifier("#count".into()),
            question_token: true,
            type_annotation: Some("number".into()),
        };
        let public = PropertySignature::new(PropertyName::Identifier("name".into()), Some("string".into()));
        let mut file = DeclarationFile::new(
            "/p/a.d.ts",
            vec![Node::Block(Block {
                header: "export declare class A {".into(),
                members: vec![
                    Node::PropertySignature(private),
                    Node::PropertySignature(public.clone()),
                ],
                footer: "}".into(),
            })],
        );

        CustomTransformers::new()
            .with_after_declarations(StripPrivateFields)
            .apply_after_declarations(&mut file);

        let Node::Block(block) = &file.statements[0] else {
            panic!("expected a block");
        };
        assert_eq!(
            block.members[0],
            Node::PropertySignature(PropertySignature {
                modifiers: vec!["readonly".into()],
                name: PropertyName::StringLiteral("#count".into()),
                question_token: true,
                type_annotation: Some("number".into()),
            })
        );
        assert_eq!(block.members[1], Node::PropertySignature(public));
        assert!(file.print().contains("readonly \"#count\"?: number;"));
    }
}

use std::path::{Path, PathBuf};

use tablecraft_config::{SharedField, SharedFieldKind};
use tablecraft_core::{GeneratedFile, capitalize};

use crate::builder::{CodeBuilder, MethodCall, MethodChain, PhpValue};

const CLASS: &str = "BlueprintMacroServiceProvider";

/// Service provider registering the `commonFields()` Blueprint macro.
pub struct BlueprintMacroFile<'a> {
    directory: &'a str,
    fields: &'a [SharedField],
}

impl<'a> BlueprintMacroFile<'a> {
    pub fn new(directory: &'a str, fields: &'a [SharedField]) -> Self {
        Self { directory, fields }
    }

    /// `app/Providers` -> `App\Providers`
    pub fn namespace(&self) -> String {
        self.directory
            .split(['/', '\\'])
            .filter(|segment| !segment.is_empty() && *segment != ".")
            .map(capitalize)
            .collect::<Vec<_>>()
            .join("\\")
    }

    /// Fully qualified provider class, for registration hints.
    pub fn class(&self) -> String {
        format!("{}\\{}", self.namespace(), CLASS)
    }
}

fn field_statement(field: &SharedField) -> String {
    let this = MethodChain::new("$this");
    let name = PhpValue::str(field.name.as_str());

    let (chain, nullable, default) = match &field.kind {
        SharedFieldKind::Timestamps => (this.then("timestamps"), false, None),
        SharedFieldKind::SoftDeletes => (this.then("softDeletes"), false, None),
        SharedFieldKind::Enum {
            values,
            nullable,
            default,
        } => {
            let values = values.iter().map(|v| PhpValue::str(v.as_str())).collect();
            let call = MethodCall::new("enum").arg(name).arg(PhpValue::List(values));
            (this.call(call), *nullable, default.as_deref())
        }
        SharedFieldKind::Column {
            ty,
            unsigned,
            nullable,
            default,
        } => {
            let chain = this
                .call(MethodCall::new(ty.as_str()).arg(name))
                .then_if(*unsigned, "unsigned");
            (chain, *nullable, default.as_deref())
        }
    };

    let chain = chain.then_if(nullable, "nullable");
    match default {
        Some(value) => chain
            .call(MethodCall::new("default").arg(PhpValue::str(value)))
            .render(),
        None => chain.render(),
    }
}

impl GeneratedFile for BlueprintMacroFile<'_> {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(self.directory).join(format!("{}.php", CLASS))
    }

    fn render(&self) -> String {
        CodeBuilder::php()
            .line("<?php")
            .blank()
            .line(&format!("namespace {};", self.namespace()))
            .blank()
            .line("use Illuminate\\Database\\Schema\\Blueprint;")
            .line("use Illuminate\\Support\\ServiceProvider;")
            .blank()
            .braced(&format!("class {} extends ServiceProvider", CLASS), "}", |b| {
                b.docblock(&["Register any application services."])
                    .braced("public function register(): void", "}", |b| {
                        b.line("//")
                    })
                    .blank()
                    .docblock(&["Bootstrap any application services."])
                    .braced("public function boot(): void", "}", |b| {
                        b.block_with_close(
                            "Blueprint::macro('commonFields', function () {",
                            "});",
                            |b| b.each(self.fields, |b, field| b.line(&field_statement(field))),
                        )
                    })
            })
            .build()
    }
}

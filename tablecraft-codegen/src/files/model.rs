use std::path::{Path, PathBuf};

use tablecraft_config::{Config, ModelsConfig, RelationKind, Relationship, TIMESTAMP_COLUMNS};
use tablecraft_core::GeneratedFile;
use tablecraft_schema::Table;

use crate::{
    SharedFieldPlan,
    builder::{CodeBuilder, MethodCall, MethodChain, PhpArray, PhpValue, quote},
    naming::{class_basename, lcfirst},
};

const SOFT_DELETES_TRAIT: &str = "Illuminate\\Database\\Eloquent\\SoftDeletes";

/// `{Model}.php` in the models directory.
pub struct ModelFile<'a> {
    config: &'a ModelsConfig,
    class: String,
    table: &'a Table,
    plan: SharedFieldPlan<'a>,
}

impl<'a> ModelFile<'a> {
    pub fn new(config: &'a Config, class: impl Into<String>, table: &'a Table) -> Self {
        Self {
            config: &config.models,
            class: class.into(),
            table,
            plan: SharedFieldPlan::classify(&table.columns, &config.global),
        }
    }

    /// A column the model can refer to: reflected, or added by a shared call.
    fn knows(&self, column: &str) -> bool {
        self.table.has_column(column) || self.plan.covers(column)
    }

    fn soft_deletes(&self) -> bool {
        self.plan.covers("deleted_at")
    }

    fn timestamped(&self) -> bool {
        TIMESTAMP_COLUMNS.iter().any(|c| self.knows(c))
    }

    fn traits(&self) -> Vec<&'a str> {
        self.config
            .traits
            .for_table(&self.table.name)
            .map(|traits| traits.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    fn relationships(&self) -> &'a [Relationship] {
        self.config
            .relationships
            .for_table(&self.table.name)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    fn own_class(&self) -> String {
        format!("{}\\{}", self.config.namespace, self.class)
    }

    /// Fully qualified imports, first occurrence wins.
    fn imports(&self) -> Vec<&'a str> {
        let mut imports: Vec<&'a str> = vec![self.config.base_model.as_str()];
        if self.soft_deletes() {
            imports.push(SOFT_DELETES_TRAIT);
        }
        imports.extend(self.traits());
        imports.extend(self.relationships().iter().map(|r| r.model.as_str()));

        let own = self.own_class();
        let mut seen: Vec<&'a str> = Vec::new();
        for import in imports {
            let import = import.trim_start_matches('\\');
            if import != own && !seen.contains(&import) {
                seen.push(import);
            }
        }
        seen
    }

    fn class_traits(&self) -> Vec<&'a str> {
        let mut traits: Vec<&'a str> = Vec::new();
        if self.soft_deletes() {
            traits.push(class_basename(SOFT_DELETES_TRAIT));
        }
        for name in self.traits().into_iter().map(class_basename) {
            if !traits.contains(&name) {
                traits.push(name);
            }
        }
        traits
    }

    fn scoped_columns(&self, value: Option<&'a Vec<String>>) -> Vec<&'a str> {
        value
            .map(|names| {
                names
                    .iter()
                    .map(String::as_str)
                    .filter(|name| *name == "*" || self.knows(name))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// `*suffix` entries expand to every column ending in `suffix`.
    fn hidden(&self) -> Vec<&'a str> {
        let mut hidden: Vec<&'a str> = Vec::new();
        let entries = self
            .config
            .hidden
            .for_table(&self.table.name)
            .map(Vec::as_slice)
            .unwrap_or_default();

        for entry in entries {
            let matches: Vec<&'a str> = match entry.strip_prefix('*') {
                Some(suffix) => self
                    .table
                    .columns
                    .iter()
                    .map(|c| c.name.as_str())
                    .filter(|name| name.ends_with(suffix))
                    .collect(),
                None if self.knows(entry) => vec![entry.as_str()],
                None => Vec::new(),
            };
            for name in matches {
                if !hidden.contains(&name) {
                    hidden.push(name);
                }
            }
        }
        hidden
    }

    fn write_properties(&self, b: &mut CodeBuilder) {
        let table = &self.table.name;

        if let Some(per_page) = self.config.per_page {
            b.push_docblock(&["The number of models to return for pagination.", "", "@var int"])
                .push_line(&format!("protected $perPage = {};", per_page))
                .push_blank();
        }

        b.push_docblock(&["The table associated with the model.", "", "@var string"])
            .push_line(&format!("protected $table = {};", quote(table)));

        if !self.timestamped() {
            b.push_blank()
                .push_docblock(&["Indicates if the model should be timestamped.", "", "@var bool"])
                .push_line("public $timestamps = false;");
        }

        if let Some(format) = &self.config.date_format {
            b.push_blank()
                .push_docblock(&[
                    "The storage format of the model's date columns.",
                    "",
                    "@var string",
                ])
                .push_line(&format!("protected $dateFormat = {};", quote(format)));
        }

        let fillable = self.scoped_columns(self.config.fillable.for_table(table));
        let guarded = self.scoped_columns(self.config.guarded.for_table(table));
        let casts: Vec<(&str, &str)> = self
            .config
            .casts
            .for_table(table)
            .map(|casts| {
                casts
                    .iter()
                    .filter(|(column, _)| self.knows(column))
                    .map(|(column, cast)| (column.as_str(), cast.as_str()))
                    .collect()
            })
            .unwrap_or_default();
        let with: Vec<&str> = self
            .config
            .with
            .for_table(table)
            .map(|with| with.iter().map(String::as_str).collect())
            .unwrap_or_default();
        let hidden = self.hidden();

        let list = "array<int, string>";
        write_array(
            b,
            "fillable",
            "The attributes that are mass assignable.",
            list,
            PhpArray::list(fillable),
        );
        write_array(
            b,
            "guarded",
            "The attributes that aren't mass assignable.",
            list,
            PhpArray::list(guarded),
        );
        write_array(
            b,
            "casts",
            "The attributes that should be cast.",
            "array<string, string>",
            PhpArray::map(casts),
        );
        write_array(
            b,
            "with",
            "The relations to eager load on every query.",
            list,
            PhpArray::list(with),
        );
        write_array(
            b,
            "hidden",
            "The attributes that should be hidden for serialization.",
            list,
            PhpArray::list(hidden),
        );

        if self.config.columns {
            let mut columns: Vec<&str> = self.table.column_names();
            for added in self.plan.added_columns() {
                if !columns.contains(&added) {
                    columns.push(added);
                }
            }
            b.push_blank().push_docblock(&[
                "The columns of the underlying table.",
                "",
                "@var array<int, string>",
            ]);
            PhpArray::list(columns).write(b, "protected $columns = ", ";");
        }
    }

    fn write_relationship(&self, b: &mut CodeBuilder, relationship: &Relationship) {
        let related = class_basename(&relationship.model);
        let method = relationship
            .method
            .clone()
            .or_else(|| relationship.table.clone())
            .unwrap_or_else(|| lcfirst(related));

        let mut call = MethodCall::new(relationship.kind.as_str())
            .arg(PhpValue::raw(format!("{}::class", related)));
        if relationship.kind == RelationKind::BelongsToMany {
            if let Some(pivot) = &relationship.table {
                call = call.arg(PhpValue::str(pivot.as_str()));
            }
        }
        if let Some(foreign_key) = &relationship.foreign_key {
            call = call.arg(PhpValue::str(foreign_key.as_str()));
            if let Some(owner_key) = &relationship.owner_key {
                call = call.arg(PhpValue::str(owner_key.as_str()));
            }
        }

        let statement = MethodChain::new("$this").call(call).render();
        let summary = format!("Relationship with {}.", related);
        b.push_blank()
            .push_docblock(&[summary.as_str()])
            .push_line(&format!("public function {}()", method))
            .push_line("{")
            .push_indent()
            .push_line(&format!("return {}", statement))
            .push_dedent()
            .push_line("}");
    }

    fn write_booted(&self, b: &mut CodeBuilder) {
        let hooks = self.config.lifecycle_hooks.for_table(&self.table.name);

        b.push_blank()
            .push_docblock(&["The \"booted\" method of the model."])
            .push_line("protected static function booted(): void")
            .push_line("{")
            .push_indent();
        match hooks.filter(|hooks| !hooks.is_empty()) {
            Some(hooks) => {
                for (event, callback) in hooks {
                    b.push_lines(&format!("static::{}({});", event, callback));
                }
            }
            None => {
                b.push_line("// Add your lifecycle hooks here");
            }
        }
        b.push_dedent().push_line("}");
    }
}

/// Documented `protected $property = [...];`, omitted when empty.
fn write_array(b: &mut CodeBuilder, property: &str, summary: &str, var: &str, array: PhpArray) {
    if array.is_empty() {
        return;
    }
    let var = format!("@var {}", var);
    b.push_blank().push_docblock(&[summary, "", var.as_str()]);
    array.write(b, &format!("protected ${} = ", property), ";");
}

impl GeneratedFile for ModelFile<'_> {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(&self.config.output_directory)
            .join(format!("{}.php", self.class))
    }

    fn render(&self) -> String {
        let base = class_basename(&self.config.base_model);
        let traits = self.class_traits();

        CodeBuilder::php()
            .line("<?php")
            .blank()
            .line(&format!("namespace {};", self.config.namespace))
            .blank()
            .each(self.imports(), |b, import| b.line(&format!("use {};", import)))
            .blank()
            .braced(&format!("class {} extends {}", self.class, base), "}", |b| {
                b.when(!traits.is_empty(), |b| {
                    b.line(&format!("use {};", traits.join(", "))).blank()
                })
                .with(|b| {
                    self.write_properties(b);
                    for relationship in self.relationships() {
                        self.write_relationship(b, relationship);
                    }
                    self.write_booted(b);
                })
            })
            .build()
    }
}

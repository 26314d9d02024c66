use std::path::{Path, PathBuf};

use tablecraft_config::{Config, SOFT_DELETE_COLUMNS, TIMESTAMP_COLUMNS};
use tablecraft_core::GeneratedFile;
use tablecraft_schema::{Column, ColumnType, Table};

use crate::{
    SharedFieldPlan,
    builder::{CodeBuilder, PhpArray, PhpValue},
    naming::lcfirst,
};

/// `{Model}Controller.php`, a resource controller for one model.
pub struct ControllerFile<'a> {
    config: &'a Config,
    class: String,
    model: String,
    table: &'a Table,
    plan: SharedFieldPlan<'a>,
}

impl<'a> ControllerFile<'a> {
    pub fn new(
        config: &'a Config,
        class: impl Into<String>,
        model: impl Into<String>,
        table: &'a Table,
    ) -> Self {
        Self {
            config,
            class: class.into(),
            model: model.into(),
            table,
            plan: SharedFieldPlan::classify(&table.columns, &config.global),
        }
    }

    /// Columns a client may submit.
    fn writable(&self) -> impl Iterator<Item = &'a Column> + '_ {
        self.table.columns.iter().filter(|column| {
            let managed = TIMESTAMP_COLUMNS
                .iter()
                .chain(SOFT_DELETE_COLUMNS)
                .any(|c| *c == column.name);
            !column.column_type.is_identity() && !managed && !self.plan.suppresses(column)
        })
    }

    fn rules(&self, update: bool) -> PhpArray {
        let mut rules = PhpArray::new();
        for column in self.writable() {
            let rule = validation_rule(column);
            let rule = if update && !rule.starts_with("sometimes") {
                format!("sometimes|{}", rule)
            } else {
                rule
            };
            rules.insert(PhpValue::str(column.name.as_str()), PhpValue::str(rule));
        }
        rules
    }

    fn write_validation(&self, b: &mut CodeBuilder, update: bool) {
        self.rules(update)
            .write(b, "$validated = $request->validate(", ");");
    }
}

/// `required|string|max:255` style rule for one column.
fn validation_rule(column: &Column) -> String {
    let presence = if column.nullable {
        "nullable"
    } else if column.default.is_some() {
        "sometimes"
    } else {
        "required"
    };

    let kind = match column.column_type {
        ColumnType::Increments
        | ColumnType::BigIncrements
        | ColumnType::Integer
        | ColumnType::BigInteger => "integer".to_string(),
        ColumnType::String => match column.length {
            Some(length) => format!("string|max:{}", length),
            None => "string".to_string(),
        },
        ColumnType::Text => "string".to_string(),
        ColumnType::DateTime | ColumnType::Timestamp | ColumnType::Date => "date".to_string(),
        ColumnType::Float | ColumnType::Decimal => "numeric".to_string(),
    };

    format!("{}|{}", presence, kind)
}

impl GeneratedFile for ControllerFile<'_> {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(&self.config.controllers.output_directory)
            .join(format!("{}.php", self.class))
    }

    fn render(&self) -> String {
        let model = &self.model;
        let var = format!("${}", lcfirst(model));

        CodeBuilder::php()
            .line("<?php")
            .blank()
            .line(&format!("namespace {};", self.config.controllers.namespace))
            .blank()
            .line(&format!("use {}\\{};", self.config.models.namespace, model))
            .line("use Illuminate\\Http\\Request;")
            .blank()
            .braced(&format!("class {} extends Controller", self.class), "}", |b| {
                b.docblock(&["Display a listing of the resource."])
                    .braced("public function index()", "}", |b| {
                        b.line(&format!("return {}::paginate();", model))
                    })
                    .blank()
                    .docblock(&["Store a newly created resource in storage."])
                    .braced("public function store(Request $request)", "}", |b| {
                        b.with(|b| self.write_validation(b, false))
                            .blank()
                            .line(&format!("{} = {}::create($validated);", var, model))
                            .blank()
                            .line(&format!("return response()->json({}, 201);", var))
                    })
                    .blank()
                    .docblock(&["Display the specified resource."])
                    .braced(&format!("public function show({} {})", model, var), "}", |b| {
                        b.line(&format!("return {};", var))
                    })
                    .blank()
                    .docblock(&["Update the specified resource in storage."])
                    .braced(
                        &format!("public function update(Request $request, {} {})", model, var),
                        "}",
                        |b| {
                            b.with(|b| self.write_validation(b, true))
                                .blank()
                                .line(&format!("{}->update($validated);", var))
                                .blank()
                                .line(&format!("return response()->json({}, 200);", var))
                        },
                    )
                    .blank()
                    .docblock(&["Remove the specified resource from storage."])
                    .braced(&format!("public function destroy({} {})", model, var), "}", |b| {
                        b.line(&format!("{}->delete();", var))
                            .blank()
                            .line("return response()->json(null, 204);")
                    })
            })
            .build()
    }
}

#[cfg(test)]
mod tests {
    use tablecraft_schema::{RawColumn, normalize};

    use super::*;

    fn raw(name: &str, native: &str, nullable: bool) -> RawColumn {
        RawColumn {
            name: name.to_string(),
            native_type: native.to_string(),
            nullable: Some(nullable),
            ..Default::default()
        }
    }

    fn policy_coverages() -> Table {
        let columns = vec![
            RawColumn {
                key: Some("PRI".to_string()),
                extra: Some("auto_increment".to_string()),
                ..raw("id", "int(11)", false)
            },
            raw("policy_id", "bigint(20)", false),
            RawColumn {
                default: Some("0".to_string()),
                ..raw("amount", "decimal(10,2)", false)
            },
            raw("note", "varchar(120)", true),
            raw("created_at", "datetime", true),
            raw("updated_at", "datetime", true),
        ];
        Table {
            name: "policy_coverages".to_string(),
            columns: columns.iter().map(normalize).collect(),
            foreign_keys: Vec::new(),
        }
    }

    #[test]
    fn test_render() {
        let config = Config::default();
        let table = policy_coverages();
        let file = ControllerFile::new(&config, "PolicycoverageController", "Policycoverage", &table);

        insta::assert_snapshot!(file.render(), @r"
        <?php

        namespace App\Http\Controllers;

        use App\Models\Policycoverage;
        use Illuminate\Http\Request;

        class PolicycoverageController extends Controller
        {
            /**
             * Display a listing of the resource.
             */
            public function index()
            {
                return Policycoverage::paginate();
            }

            /**
             * Store a newly created resource in storage.
             */
            public function store(Request $request)
            {
                $validated = $request->validate([
                    'policy_id' => 'required|integer',
                    'amount' => 'sometimes|numeric',
                    'note' => 'nullable|string|max:120',
                ]);

                $policycoverage = Policycoverage::create($validated);

                return response()->json($policycoverage, 201);
            }

            /**
             * Display the specified resource.
             */
            public function show(Policycoverage $policycoverage)
            {
                return $policycoverage;
            }

            /**
             * Update the specified resource in storage.
             */
            public function update(Request $request, Policycoverage $policycoverage)
            {
                $validated = $request->validate([
                    'policy_id' => 'sometimes|required|integer',
                    'amount' => 'sometimes|numeric',
                    'note' => 'sometimes|nullable|string|max:120',
                ]);

                $policycoverage->update($validated);

                return response()->json($policycoverage, 200);
            }

            /**
             * Remove the specified resource from storage.
             */
            public function destroy(Policycoverage $policycoverage)
            {
                $policycoverage->delete();

                return response()->json(null, 204);
            }
        }
        ");
    }

    #[test]
    fn test_shared_columns_are_not_validated() {
        let config: Config = r#"
            [global]
            use_common_fields = true

            [[global.common_fields]]
            name = "note"
            type = "string"
            nullable = true
        "#
        .parse()
        .unwrap();
        let table = policy_coverages();
        let rendered = ControllerFile::new(&config, "C", "M", &table).render();

        assert!(!rendered.contains("'note'"));
        assert!(rendered.contains("'policy_id' => 'required|integer',"));
    }

    #[test]
    fn test_no_writable_columns() {
        let table = Table {
            name: "counters".to_string(),
            columns: vec![normalize(&RawColumn {
                key: Some("PRI".to_string()),
                extra: Some("auto_increment".to_string()),
                ..raw("id", "int", false)
            })],
            foreign_keys: Vec::new(),
        };
        let config = Config::default();
        let rendered = ControllerFile::new(&config, "CounterController", "Counter", &table).render();

        assert!(rendered.contains("$validated = $request->validate([]);"));
    }
}

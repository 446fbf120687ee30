use std::sync::Arc;

use super::{Clause, DecisionChain, Operand, RuleSet, Section};
use crate::model::{
    area::AreaIndex,
    attribute::{AttributeKind, AttributeRegistry, DecimalAttribute},
    condition::Condition,
    custom_model::{CustomModel, Keyword, Op, Statement},
    turn_cost::TurnCostProvider,
    weighting::{CustomWeighting, Weighting, WeightingConfig},
    CustomModelError,
};

/// turns custom models into weightings for the attributes of one registry.
pub struct CustomModelCompiler<'a> {
    registry: &'a dyn AttributeRegistry,
    config: WeightingConfig,
}

impl<'a> CustomModelCompiler<'a> {
    pub fn new(registry: &'a dyn AttributeRegistry, config: WeightingConfig) -> Self {
        CustomModelCompiler { registry, config }
    }

    /// resolves, type checks and bounds a custom model.
    ///
    /// # Returns
    ///
    /// * a weighting ready to be shared between searches, or the first
    ///   configuration error found in the model
    pub fn compile(
        &self,
        model: &CustomModel,
        turn_cost_provider: Arc<dyn TurnCostProvider>,
    ) -> Result<CustomWeighting, CustomModelError> {
        let distance_influence = non_negative(
            "distance_influence",
            model
                .distance_influence
                .unwrap_or(self.config.default_distance_influence),
        )?;
        let heading_penalty = non_negative(
            "heading_penalty",
            model
                .heading_penalty
                .unwrap_or(self.config.default_heading_penalty),
        )?;
        let speed_attribute = self.resolve_speed_attribute(&model.speed_attribute)?;
        let areas = AreaIndex::try_from(&model.areas)?;

        let speed_rules = self.compile_section(
            Section::Speed,
            &model.speed,
            &areas,
            Some(speed_attribute.max_value),
        )?;
        let priority_rules = self.compile_section(Section::Priority, &model.priority, &areas, None)?;

        let max_speed = speed_rules
            .upper_bound(speed_attribute.max_value)
            .min(speed_attribute.max_value);
        let max_priority = priority_rules.upper_bound(1.0);
        log::debug!(
            "bounds of custom model on '{}': max speed {max_speed} {}, max priority {max_priority}",
            model.speed_attribute,
            model.speed_unit
        );
        if max_speed.is_nan() || max_speed <= 0.0 {
            return Err(CustomModelError::InvalidParameter {
                parameter: String::from("speed"),
                message: format!("maximum speed is {max_speed}, no edge could be used"),
            });
        }
        if max_priority.is_nan() || max_priority <= 0.0 {
            return Err(CustomModelError::InvalidParameter {
                parameter: String::from("priority"),
                message: format!("maximum priority is {max_priority}, no edge could be used"),
            });
        }

        let weighting = CustomWeighting {
            speed_attribute,
            speed_unit: model.speed_unit,
            speed_rules,
            priority_rules,
            areas,
            max_speed,
            max_priority,
            distance_influence,
            heading_penalty,
            turn_cost_provider,
        };
        log::info!(
            "compiled custom model with {} speed and {} priority statements, {} areas, min weight per meter {}",
            model.speed.len(),
            model.priority.len(),
            weighting.areas.len(),
            weighting.min_weight_per_distance()
        );
        Ok(weighting)
    }

    fn resolve_speed_attribute(&self, name: &str) -> Result<DecimalAttribute, CustomModelError> {
        if name.is_empty() {
            return Err(CustomModelError::InvalidParameter {
                parameter: String::from("speed_attribute"),
                message: String::from("no base speed attribute given"),
            });
        }
        let kind = self
            .registry
            .attribute_kind(name)
            .ok_or_else(|| CustomModelError::UnknownAttribute(name.to_string()))?;
        if kind != AttributeKind::Decimal {
            return Err(CustomModelError::TypeMismatch {
                attribute: name.to_string(),
                kind,
                message: String::from("cannot be used as the base speed"),
            });
        }
        let resolved = self
            .registry
            .resolve_decimal(name)
            .ok_or_else(|| CustomModelError::UnknownAttribute(name.to_string()))?;
        if !resolved.max_value.is_finite() {
            return Err(CustomModelError::UnboundedOperand {
                attribute: name.to_string(),
                max: resolved.max_value,
            });
        }
        Ok(resolved)
    }

    /// compiles statements into chains. a new chain starts at every `if`.
    fn compile_section(
        &self,
        section: Section,
        statements: &[Statement],
        areas: &AreaIndex,
        speed_max: Option<f64>,
    ) -> Result<RuleSet, CustomModelError> {
        let mut chains: Vec<DecisionChain> = vec![];
        let mut chain_closed = true;
        for (index, statement) in statements.iter().enumerate() {
            let wrap = |source: CustomModelError| CustomModelError::Statement {
                section,
                index,
                statement: statement.to_string(),
                source: Box::new(source),
            };
            let clause = self.compile_clause(statement, areas).map_err(wrap)?;
            if let (Some(max), Op::Limit, Operand::Literal(limit)) =
                (speed_max, statement.op, clause.operand)
            {
                if limit > max {
                    log::warn!(
                        "{section} statement {index} ({statement}) limits to {limit}, above the maximum {max} of the speed attribute; it has no effect"
                    );
                }
            }
            match statement.keyword {
                Keyword::If => {
                    chains.push(DecisionChain::new(clause));
                    chain_closed = false;
                }
                keyword => match chains.last_mut() {
                    Some(chain) if !chain_closed => {
                        chain.push(clause);
                        chain_closed = keyword == Keyword::Else;
                    }
                    _ => {
                        let message = format!("'{keyword}' must follow 'if' or 'else_if'");
                        return Err(wrap(CustomModelError::MalformedChain(message)));
                    }
                },
            }
        }
        Ok(RuleSet::new(chains))
    }

    fn compile_clause(
        &self,
        statement: &Statement,
        areas: &AreaIndex,
    ) -> Result<Clause, CustomModelError> {
        let condition = match statement.keyword {
            Keyword::Else if !statement.condition.trim().is_empty() => {
                return Err(CustomModelError::MalformedChain(String::from(
                    "'else' must not have a condition",
                )))
            }
            Keyword::Else => Condition::Constant(true),
            Keyword::If | Keyword::ElseIf => {
                Condition::compile(&statement.condition, self.registry, areas)?
            }
        };
        let operand = Operand::resolve(&statement.value, self.registry)?;
        Ok(Clause {
            condition,
            op: statement.op,
            operand,
        })
    }
}

fn non_negative(parameter: &str, value: f64) -> Result<f64, CustomModelError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(CustomModelError::InvalidParameter {
            parameter: parameter.to_string(),
            message: format!("must be a finite number >= 0, found {value}"),
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::{
        attribute::{AttributeConfig, InMemoryRegistry},
        turn_cost::NoTurnCostProvider,
    };
    use geo::{line_string, polygon};

    fn registry() -> InMemoryRegistry {
        InMemoryRegistry::new(vec![
            AttributeConfig::decimal("car_average_speed", Some(155.0), true),
            AttributeConfig::decimal("grade", None, false),
            AttributeConfig::enumeration("road_class", &["OTHER", "PRIMARY", "SERVICE"], false),
            AttributeConfig::boolean("toll", false),
        ])
        .expect("test invariant failed: registry could not be built")
    }

    fn compile(model: &CustomModel) -> Result<CustomWeighting, CustomModelError> {
        let registry = registry();
        CustomModelCompiler::new(&registry, WeightingConfig::default())
            .compile(model, Arc::new(NoTurnCostProvider))
    }

    fn model() -> CustomModel {
        CustomModel::new("car_average_speed")
    }

    /// unwraps the statement context of a clause error
    fn statement_error(result: Result<CustomWeighting, CustomModelError>) -> (Section, usize, CustomModelError) {
        match result {
            Err(CustomModelError::Statement {
                section,
                index,
                source,
                ..
            }) => (section, index, *source),
            Err(other) => panic!("expected a statement error, found {other}"),
            Ok(_) => panic!("expected a statement error, model compiled"),
        }
    }

    #[test]
    fn test_defaults_from_config() {
        let registry = registry();
        let config = WeightingConfig {
            default_heading_penalty: 20.0,
            default_distance_influence: 10.0,
        };
        let weighting = CustomModelCompiler::new(&registry, config)
            .compile(&model(), Arc::new(NoTurnCostProvider))
            .expect("model should compile");
        assert_eq!(weighting.heading_penalty(), 20.0);
        assert_eq!(weighting.distance_influence(), 10.0);
        let weighting = compile(&model().set_distance_influence(0.0)).expect("model should compile");
        assert_eq!(weighting.distance_influence(), 0.0);
        assert_eq!(weighting.heading_penalty(), WeightingConfig::DEFAULT_HEADING_PENALTY);
    }

    #[test]
    fn test_rejects_invalid_parameters() {
        for model in [
            model().set_distance_influence(-1.0),
            model().set_distance_influence(f64::INFINITY),
            model().set_heading_penalty(f64::NAN),
            model().set_heading_penalty(-5.0),
        ] {
            assert!(matches!(
                compile(&model),
                Err(CustomModelError::InvalidParameter { .. })
            ));
        }
    }

    #[test]
    fn test_rejects_bad_speed_attribute() {
        assert!(matches!(
            compile(&CustomModel::default()),
            Err(CustomModelError::InvalidParameter { .. })
        ));
        assert!(matches!(
            compile(&CustomModel::new("bike_average_speed")),
            Err(CustomModelError::UnknownAttribute(_))
        ));
        assert!(matches!(
            compile(&CustomModel::new("toll")),
            Err(CustomModelError::TypeMismatch { .. })
        ));
        assert!(matches!(
            compile(&CustomModel::new("grade")),
            Err(CustomModelError::UnboundedOperand { .. })
        ));
    }

    #[test]
    fn test_malformed_chains() {
        let (section, index, source) = statement_error(compile(
            &model().add_to_priority(Statement::else_clause(Op::Multiply, 0.5)),
        ));
        assert_eq!((section, index), (Section::Priority, 0));
        assert!(matches!(source, CustomModelError::MalformedChain(_)));

        let (_, index, source) = statement_error(compile(
            &model()
                .add_to_speed(Statement::if_clause("toll", Op::Multiply, 0.5))
                .add_to_speed(Statement::else_clause(Op::Multiply, 0.9))
                .add_to_speed(Statement::else_if_clause("toll", Op::Multiply, 0.5)),
        ));
        assert_eq!(index, 2);
        assert!(matches!(source, CustomModelError::MalformedChain(_)));

        let mut with_condition = Statement::else_clause(Op::Multiply, 0.5);
        with_condition.condition = String::from("toll");
        let (_, _, source) = statement_error(compile(
            &model()
                .add_to_priority(Statement::if_clause("toll", Op::Multiply, 0.5))
                .add_to_priority(with_condition),
        ));
        assert!(matches!(source, CustomModelError::MalformedChain(_)));
    }

    #[test]
    fn test_statement_errors_name_the_clause() {
        let result = compile(
            &model()
                .add_to_priority(Statement::if_clause("toll", Op::Multiply, 0.5))
                .add_to_priority(Statement::if_clause("surface == PAVED", Op::Multiply, 0.5)),
        );
        let message = match &result {
            Err(e) => e.to_string(),
            Ok(_) => panic!("unknown attribute should fail"),
        };
        assert!(message.starts_with("priority statement 1"), "{message}");
        assert!(message.contains("surface"), "{message}");

        let (section, _, source) = statement_error(compile(
            &model().add_to_speed(Statement::if_clause("toll", Op::Multiply, "grade")),
        ));
        assert_eq!(section, Section::Speed);
        assert!(matches!(source, CustomModelError::UnboundedOperand { .. }));

        let (_, _, source) = statement_error(compile(
            &model().add_to_speed(Statement::if_clause("toll", Op::Multiply, -0.5)),
        ));
        assert!(matches!(source, CustomModelError::InvalidLiteral { .. }));

        let (_, _, source) = statement_error(compile(
            &model().add_to_priority(Statement::if_clause("in_city", Op::Multiply, 0.5)),
        ));
        assert!(matches!(source, CustomModelError::UnknownArea(_)));
    }

    #[test]
    fn test_rejects_unusable_bounds() {
        assert!(matches!(
            compile(&model().add_to_speed(Statement::if_clause("true", Op::Limit, 0.0))),
            Err(CustomModelError::InvalidParameter { parameter, .. }) if parameter == "speed"
        ));
        assert!(matches!(
            compile(&model().add_to_priority(Statement::if_clause("true", Op::Multiply, 0.0))),
            Err(CustomModelError::InvalidParameter { parameter, .. }) if parameter == "priority"
        ));
        // a guarded zero leaves other edges usable
        assert!(compile(&model().add_to_priority(Statement::if_clause("toll", Op::Multiply, 0.0))).is_ok());
    }

    #[test]
    fn test_rejects_invalid_areas() {
        let with_hole = geo::Polygon::new(
            line_string![
                (x: 0.0, y: 0.0),
                (x: 4.0, y: 0.0),
                (x: 4.0, y: 4.0),
                (x: 0.0, y: 0.0)
            ],
            vec![line_string![
                (x: 1.0, y: 0.5),
                (x: 2.0, y: 0.5),
                (x: 2.0, y: 1.0),
                (x: 1.0, y: 0.5)
            ]],
        );
        assert!(matches!(
            compile(&model().add_area("holey", with_hole)),
            Err(CustomModelError::InvalidArea { .. })
        ));
        let square = polygon![
            (x: 0.0, y: 0.0),
            (x: 1.0, y: 0.0),
            (x: 1.0, y: 1.0),
            (x: 0.0, y: 0.0)
        ];
        assert!(matches!(
            compile(&model().add_area("a", square.clone()).add_area("a", square)),
            Err(CustomModelError::InvalidArea { .. })
        ));
    }

    #[test]
    fn test_sequential_chains() {
        let weighting = compile(
            &model()
                .add_to_priority(Statement::if_clause("toll", Op::Multiply, 0.5))
                .add_to_priority(Statement::if_clause("road_class == PRIMARY", Op::Multiply, 0.5))
                .add_to_priority(Statement::else_clause(Op::Multiply, 0.8)),
        )
        .expect("model should compile");
        assert_eq!(weighting.priority_rules.chains().len(), 2);
        assert_eq!(weighting.priority_rules.chains()[1].clauses().len(), 2);
        assert!((weighting.max_priority() - 0.8).abs() < 1e-12);
    }
}

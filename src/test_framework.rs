use crate::pipeline::Pipeline;

pub struct PipelineCase {
    pub name: &'static str,
    pub input: &'static str,
    pub min: i64,
    pub expected_present: bool,
    pub expected_render: Option<&'static str>,
}

pub fn run_case(case: &PipelineCase) -> Result<(), String> {
    println!("Running case: {}", case.name);

    let result = Pipeline::new(case.min).run(case.input);

    if result.is_present() != case.expected_present {
        return Err(format!(
            "Presence mismatch for {:?}.\nExpected present: {}\nGot: {}",
            case.input, case.expected_present, result
        ));
    }

    if let Some(expected_render) = case.expected_render {
        let rendered = result.to_string();
        if rendered != expected_render {
            return Err(format!(
                "Render mismatch.\nExpected: {}\nGot: {}",
                expected_render, rendered
            ));
        }
    }

    Ok(())
}

#[macro_export]
macro_rules! pipeline_suite {
    ($($name:ident => $case:expr),* $(,)?) => {
        $(
            #[test]
            fn $name() {
                if let Err(e) = $crate::test_framework::run_case(&$case) {
                    panic!("{}", e);
                }
            }
        )*
    };
}

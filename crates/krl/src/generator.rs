use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use sketch_common::Path;
use tracing::{debug, warn};

use crate::{
    error::Result,
    mapper::Canvas,
    motion::{Interpretation, MotionSpec, StartPosition},
    program::{Comment, Identifier, Pose, Program, ProgramBuilder, Statement},
    request::{FALLBACK_MOTION, GenerationRequest},
};

pub const DEFAULT_PROGRAM_NAME: &str = "sketch_program";

const HOME_POSITION: Identifier = Identifier::from_static("home_position");
const HOME_POSE: Pose = Pose::integer(0, 0, 0);

/// Single-target placeholder
const DEFAULT_TARGET: Pose = Pose::integer(100, 200, 300);
/// Placeholder auxiliary and end points for a circular move
const DEFAULT_ARC: (Pose, Pose) = (Pose::integer(150, 250, 350), Pose::integer(200, 300, 400));
const DEFAULT_SPLINE: [Pose; 5] = [
    Pose::integer(100, 200, 300),
    Pose::integer(150, 250, 350),
    Pose::integer(200, 300, 400),
    Pose::integer(250, 350, 450),
    Pose::integer(300, 400, 500),
];

// Sample blocks multiply these by the 1-based block number
const SAMPLE_TARGET: (i64, i64, i64) = (100, 200, 300);
const SAMPLE_ARC: [(i64, i64, i64); 2] = [(150, 250, 350), (200, 300, 400)];
const SAMPLE_SPLINE: [((i64, i64, i64), char); 3] = [
    ((100, 200, 300), 'a'),
    ((150, 250, 350), 'b'),
    ((200, 300, 400), 'c'),
];

const DEFAULT_COMMENT: &str = "Default coordinates";

/// Knobs for program generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct GeneratorOptions {
    /// Name written after `DEF`; also the output file stem
    pub program_name: String,
    /// Pixel frame mapped onto the workspace
    pub canvas_width: u32,
    pub canvas_height: u32,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            program_name: DEFAULT_PROGRAM_NAME.to_string(),
            canvas_width: Canvas::DEFAULT.width(),
            canvas_height: Canvas::DEFAULT.height(),
        }
    }
}

/// Renders a request and its paths into a KRL program.
///
/// Generation never fails: missing motion entries, short paths and empty
/// path lists all fall back to fixed placeholder targets.
#[derive(Debug, Clone)]
pub struct ProgramGenerator {
    name: Identifier,
    canvas: Canvas,
}

impl Default for ProgramGenerator {
    fn default() -> Self {
        Self {
            name: Identifier::from_static(DEFAULT_PROGRAM_NAME),
            canvas: Canvas::DEFAULT,
        }
    }
}

impl ProgramGenerator {
    pub fn new(options: &GeneratorOptions) -> Result<Self> {
        Ok(Self {
            name: Identifier::new(options.program_name.clone())?,
            canvas: Canvas::new(options.canvas_width, options.canvas_height)?,
        })
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn build(&self, request: &GenerationRequest, paths: &[Path]) -> Program {
        debug!(
            paths = paths.len(),
            motions = request.motion_specs.len(),
            clarifications = %request.clarifications,
            "Generating program"
        );

        let mut program = ProgramBuilder::new(self.name.clone());
        program
            .statement(Statement::Ini)
            .blank()
            .statement(Statement::DeclE6Pos { name: HOME_POSITION, pose: HOME_POSE })
            .blank();

        let home = request.start_position == StartPosition::Home;
        if home {
            program
                .comment("Move to home position")
                .statement(Statement::PtpTo(HOME_POSITION))
                .blank();
        }

        if paths.is_empty() {
            self.sample_blocks(&mut program, &request.motion_specs);
        } else {
            self.path_blocks(&mut program, request, paths);
        }

        if home {
            program
                .comment("Return to home position")
                .statement(Statement::PtpTo(HOME_POSITION));
        }

        program.finish()
    }

    /// Program text, one statement per `\n`-terminated line
    pub fn generate(&self, request: &GenerationRequest, paths: &[Path]) -> String {
        self.build(request, paths).to_string()
    }

    fn path_blocks(&self, program: &mut ProgramBuilder, request: &GenerationRequest, paths: &[Path]) {
        if paths.len() > request.motion_specs.len() {
            warn!(
                paths = paths.len(),
                motions = request.motion_specs.len(),
                fallback = %FALLBACK_MOTION,
                "Fewer motion types than paths, using fallback for the rest"
            );
        }

        program.comment("Process detected paths from sketch");
        for (index, path) in paths.iter().enumerate() {
            let motion = request.motion_spec_for(index);
            let targets = match request.interpretation {
                Interpretation::Coordinates => self.targets(path, motion),
                Interpretation::Direct => Vec::new(),
            };

            program.comment(format!("Path {} motion", index + 1));
            match motion {
                MotionSpec::Ptp => match targets.first() {
                    Some(target) => program.statement(Statement::Ptp(*target)),
                    None => program.statement_with_comment(Statement::Ptp(DEFAULT_TARGET), DEFAULT_COMMENT),
                },
                MotionSpec::Lin => match targets.first() {
                    Some(target) => program.statement(Statement::Lin(*target)),
                    None => program.statement_with_comment(Statement::Lin(DEFAULT_TARGET), DEFAULT_COMMENT),
                },
                MotionSpec::Circ => match targets.as_slice() {
                    [auxiliary, end, ..] => program.statement(Statement::Circ { auxiliary: *auxiliary, end: *end }),
                    _ => {
                        debug!(path = path.id(), points = path.length(), "Too few points for CIRC, using placeholder arc");
                        let (auxiliary, end) = DEFAULT_ARC;
                        program.statement_with_comment(Statement::Circ { auxiliary, end }, DEFAULT_COMMENT)
                    }
                },
                MotionSpec::Spline => {
                    let poses = if targets.is_empty() { DEFAULT_SPLINE.to_vec() } else { targets };
                    program.spline(poses.into_iter().map(|pose| (pose, None)))
                }
            };
            program.blank();
        }
    }

    fn sample_blocks(&self, program: &mut ProgramBuilder, motions: &[MotionSpec]) {
        program.comment("No paths detected in sketch, generating sample motions");
        for (index, motion) in motions.iter().enumerate() {
            let n = index as i64 + 1;
            match motion {
                MotionSpec::Ptp => program.statement_with_comment(
                    Statement::Ptp(Pose::scaled(SAMPLE_TARGET, n)),
                    format!("Sample point {}", n),
                ),
                MotionSpec::Lin => program.statement_with_comment(
                    Statement::Lin(Pose::scaled(SAMPLE_TARGET, n)),
                    format!("Sample point {}", n),
                ),
                MotionSpec::Circ => program.statement_with_comment(
                    Statement::Circ {
                        auxiliary: Pose::scaled(SAMPLE_ARC[0], n),
                        end: Pose::scaled(SAMPLE_ARC[1], n),
                    },
                    format!("Sample points {}", n),
                ),
                MotionSpec::Spline => program.spline(SAMPLE_SPLINE.iter().map(|(base, suffix)| {
                    let comment = Comment::new(format!("Sample point {}{}", n, suffix));
                    (Pose::scaled(*base, n), Some(comment))
                })),
            };
            program.blank();
        }
    }

    /// Mapped targets for one path, capped at what the motion consumes
    fn targets(&self, path: &Path, motion: MotionSpec) -> Vec<Pose> {
        path.points()
            .iter()
            .take(motion.max_targets())
            .map(|point| Pose::from(self.canvas.map(*point)))
            .collect()
    }
}

/// Generate program text with the default name and 400 x 300 canvas
pub fn generate(request: &GenerationRequest, paths: &[Path]) -> String {
    ProgramGenerator::default().generate(request, paths)
}

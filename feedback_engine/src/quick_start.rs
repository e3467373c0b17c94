/*!

# Quick start

This example shows how to go from a 360°-feedback survey export to the three
chart-ready aggregates.

**Collecting the feedback** Create one evaluation question per competency and
collaborator in your survey tool. The important part is the column naming
convention in the export: each evaluation column must read
`<question> >> <collaborator>`, for example
`Comunicação clara e objetiva >> Ana`. The answer options are the three
standard tiers (`Pode melhorar…`, `Atende às expectativas…`,
`Supera as expectativas…`) plus `Não se aplica`. Team-strength questions are
multi-select checkboxes whose columns read
`Pontos fortes >> <strength phrase>`.

**Exporting** Download the responses as CSV (or Excel) once the survey
closes.

**Running** Point `fbradar` at the export:

```bash
fbradar -i retro_q2.csv
```

The summary is printed as JSON. To write it to a file and keep a prompt
context for a downstream insights step:

```bash
fbradar -i retro_q2.csv --out retro_q2_summary.json \
    --insights-context retro_q2_context.txt
```

The output carries three independent structures:

```json
{
  "radar": {
    "data": [
      { "competency": "Comunicação", "collaborators": { "Ana": 2.5 } }
    ],
    "membersWithNoRatings": []
  },
  "strengths": [
    { "name": "Domínio técnico", "needsImprovement": 0, "asExpected": 1, "exceeds": 3 }
  ],
  "ratings": [
    { "name": "Supera expectativas", "value": 50.0, "color": "#4CAF50" }
  ]
}
```

`radar` feeds the per-collaborator competency radar, `strengths` the
team-strength bar breakdown and `ratings` the overall distribution pie. Any
charting layer that understands this contract can render the result; the
aggregation itself never draws anything.

**Using the library** The same computation is available programmatically:

```rust
use feedback_engine::{run_feedback_stats, FeedbackRow, FeedbackRules};

let rows = vec![FeedbackRow::from_text_pairs(&[
    ("Comunicação clara >> Ana", "Supera as expectativas"),
])];
let summary = run_feedback_stats(&rows, &FeedbackRules::DEFAULT_RULES);
assert_eq!(summary.radar.points.len(), 5);
```

If your rows are assembled incrementally, see
[`builder::Builder`](crate::builder::Builder).

*/

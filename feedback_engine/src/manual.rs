/*!

This is the long-form manual for `feedback_engine` and `fbradar`.

## Input formats

The following formats are supported:
* `csv` Comma Separated Values, the default export of the survey tool
* `xlsx` Excel spreadsheets

### Header convention

Every evaluation column is expected to follow the convention

```text
<question text> >> <collaborator name>[ >> <inline answer>]
```

For example `Comunicação clara e objetiva >> Ana`. Columns without a
`>>`-delimited collaborator segment (such as `Submission Date`) are metadata
and are ignored by the per-collaborator aggregations; the overall rating
distribution still scans every text cell.

The optional third segment carries the answer text itself. Some survey tools
export one column per possible answer and mark the chosen one with `1`,
`true` or a checked box; in that layout the cell only says *that* an answer
was chosen, and the header says *which*.

Repeated questions about the same person are exported with a trailing
`_<digits>` suffix on the collaborator segment (`Ana_1`, `Ana_2`). All
suffix and accent variants of one name are grouped under the first spelling
seen.

### Answers

Free-text answers are canonicalized before scoring. Emoji are stripped,
whitespace is collapsed and the comparison ignores case and accents, so
`🎉 Parabéns! Supera as expectativas.` and `supera expectativas` land on the
same tier. Answers containing `não se aplica` (or equal to `n/a`/`na`) are
excluded from every average and count. Anything that matches no known
pattern is also excluded and only reported in the debug log.

## Configuration

`fbradar` comes with sensible defaults but accepts a job description in
JSON for repeatable runs:

```json
{
    "surveyName": "Retro Q2",
    "fileSources": [
        { "provider": "csv", "filePath": "retro_q2.csv" }
    ],
    "outputPath": "retro_q2_summary.json"
}
```

Notes:
- `provider` is `csv` or `xlsx`.
- `filePath` is resolved relative to the configuration file.
- `excelWorksheetName` (optional) selects the worksheet of an `xlsx` source;
  without it the file must contain exactly one worksheet.
- command line flags override their configuration counterparts.

*/

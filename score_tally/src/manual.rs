/*!

This is the long-form manual for `score_tally` and `esc_tally`.

## Input format

The responses are collected with a form (Google Forms, Microsoft Forms) where each
judge gives a score to every performer in every category. The responses sheet has
one row per judge and one column per question:

| Timestamp        | Ocenjevalec: | 1) Alice [Song] | 1) Alice [Staging] | 2) Bob [Song] | ... |
|------------------|--------------|-----------------|--------------------|---------------|-----|
| 13/05/2023 21:02 | Ana          | 8               | 5                  | 7             |     |
| 13/05/2023 21:04 | Jure         | 6               | 7                  | 10            |     |

The two metadata columns (judge and timestamp) are recognized by their exact label,
which depends on the language of the form (see below). All the other columns must
have a label of the form:

```text
<index>) <performer> [<category>]
```

which is what Google Forms produces for a "Multiple choice grid" or "Checkbox grid"
question named `<index>) <performer>` with one row per category. The performer name
may itself contain brackets: the category is always the content of the last pair of
brackets.

A column that is not metadata and does not follow this pattern stops the tabulation:
skipping it would silently change the totals. The same goes for a scoring cell that
is empty or does not contain a number. Text cells containing a number (`"8"`) are
accepted.

## Output format

A new worksheet is added to a copy of the spreadsheet, with one row per performer in the
order in which the performers first appear in the responses:

| No. | Performer | Song | Staging |
|-----|-----------|------|---------|
| 1   | Alice     | 14   | 12      |
| 2   | Bob       | 17   | 9       |

The header row is written in bold. The names of the categories in the header are
taken from the first performer. If the performers were not all scored in the same
categories, pass `--check-categories` to detect it instead of producing a misaligned
table.

## Languages

| code | judge column   | timestamp column | results worksheet | index | performer |
|------|----------------|------------------|-------------------|-------|-----------|
| `sl` | `Ocenjevalec:` | `Timestamp`      | `Results`         | `No.` | `Izvajalec` |
| `en` | `Judge:`       | `Timestamp`      | `Results`         | `No.` | `Performer` |

`sl` is the default.

## Running

```bash
esc_tally --spreadsheet "ESC 2023" --language en
```

reads the worksheet `Form Responses` of `ESC 2023.xlsx` and writes a copy of it,
`ESC 2023 (results).xlsx`, with the added worksheet `Results`. The original file is
not modified: the copy only keeps the values of the other worksheets, not their
formatting. Use `--save-as <path>` to choose another destination. The tabulation
refuses to run if a worksheet with that name (in any case) already exists.

The options can also be provided through a JSON configuration file:

```json
{
  "spreadsheet": "ESC 2023",
  "language": "en",
  "responsesWorksheet": "Form Responses",
  "outputRows": 100,
  "outputColumns": 20,
  "checkCategories": true
}
```

```bash
esc_tally --config esc2023.json --out stdout
```

*/

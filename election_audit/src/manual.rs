/*!

This is the long-form manual for `election_audit` and `votecheck`.

## Input format

The vote log is a text file with one vote per line:

```text
id: 1, time: 2024-05-01 10:00:00, ip: 192.168.0.10, candidate: Ivanov Ivan
id: 2, time: 2024-05-01 10:00:07, ip: 192.168.0.11, candidate: Petrov Petr
```

Fields must appear in this order. The candidate name runs until the end of the line.
Lines that do not follow this pattern are ignored. The IP is only compared as text,
and the id is not checked for uniqueness.

Timestamps are read as `YYYY-MM-DD HH:MM:SS`. `YYYY-MM-DD HH:MM` and a date alone
(read as midnight) are also accepted. An unreadable timestamp stops the analysis
if it belongs to a candidate with at least 10 votes.

## Name correction

Names with few votes are considered typos of a frequent name, and their votes are moved
to it. A name is rare if it has fewer than `max(total votes / 1000, 5)` votes.
A rare name is corrected to the first frequent name (in order of appearance in the log)
that is at most 2 edits away. An edit is an insertion, a deletion, a substitution
or the swap of two adjacent characters.

Rare names are never merged together, and frequent names are never corrected.

## Fraud heuristics

Two scores are computed for each candidate:
- the fraction of distinct IPs among its votes (between 0 and 1)
- for candidates with at least 10 votes, the average interval in seconds between two
  consecutive votes, ignoring votes at the same time. It is infinite if all the votes
  happened at the same time.

For each score, the 3 most suspicious candidates are checked:
- a fraction of distinct IPs below 30% flags the candidate
- an average interval below 60 seconds flags the candidate

A candidate flagged by both checks is reported with the interval reason only.

## Command line

```bash
votecheck -i data/votes.txt
```

Options:
- `--input`, `-i` (file path): the vote log
- `--config`, `-c` (file path, optional): a JSON configuration file, see below
- `--out`, `-o` (file path or `stdout`, optional): writes a JSON summary of the analysis
  (with `stdout`, the console report is printed on stderr instead)
- `--reference`, `-r` (file path, optional): a JSON summary to compare the result with.
  The program fails if they differ.
- `--top` (default 10): number of candidates in the ranking
- `--suspects` (default 5): number of candidates in each suspect ranking
- `--lang` (`en` or `ru`, default `en`): language of the report
- `--verbose`: turns on debug logging

## Configuration

All the fields are optional. Command line options take precedence.

```json
{
  "contestName": "City council 2024",
  "inputFile": "votes.txt",
  "outputFile": "summary.json",
  "topCandidates": 10,
  "topSuspects": 5,
  "language": "ru"
}
```

A relative `inputFile` is read from the directory of the configuration file.

*/

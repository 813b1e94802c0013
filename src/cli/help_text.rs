pub(super) const ROOT_LONG_ABOUT: &str = "\
Compare files and subdirectories under two directories recursively

dircomp walks two directory trees and reports, for every relative path, whether
it exists under one side only, is a file on one side and a directory on the
other, or is a file on both sides whose size, time of last modification, or
contents differ. It is meant for one-shot audits such as verifying a backup,
validating a sync, or diffing two release trees. Nothing is ever written to
either tree.

HOW FILES ARE COMPARED:

  Files present on both sides go through a series of checks, and the first
  check that finds a difference decides the outcome:

    1. size:  different sizes are reported right away.
    2. mtime: same-size files whose modification times differ by more than
              --mtime-tolerance whole seconds are reported.
    3. contents (only with -c): the files are read side by side in 1 MiB
              chunks and compared byte for byte, stopping at the first
              difference.

  Without -c, files that pass the size and time checks are only presumed
  identical; their contents are never read.

OUTPUT:

  The report is written to stdout as sections, each with a *** heading ***
  and one path per line in sorted order:

    Entries only under \"A\"
    Entries only under \"B\"
    Files with different size
    Files with same size, different time of last modification
    Files with same size, different contents           (with -c)
    Files that could not be compared                   (when any)
    Identical files                                    (with -c -i)
    Files with same size and time, contents not compared (with -i, without -c)

  Directories are listed with a trailing separator. A path that is a
  directory on one side and a file on the other is listed under both
  \"Entries only under\" sections. Non-ASCII characters in paths are printed
  as backslash escapes.

ERRORS AND WARNINGS:

  Invalid arguments (missing paths, the same directory twice, one directory
  inside the other) and an unreadable root end the run with a non-zero exit
  status and no report. A subdirectory that cannot be listed is skipped with
  a warning on stderr. A file that cannot be read is listed under \"Files
  that could not be compared\". Finding differences is not an error: the
  exit status is 0 whenever the comparison completed.

EXAMPLES:

  Quick check of a backup (names, types, sizes, times):
    $ dircomp ~/photos /mnt/backup/photos

  Full verification, tolerating coarse timestamps on FAT/exFAT media:
    $ dircomp -c -m 2 ~/photos /media/usb/photos

  Record a fingerprint of the differences to compare with a later run:
    $ dircomp --fingerprint release-1.0 release-1.1
";
